//! # Regimate - Electrical Standards Assistant Core
//!
//! Jurisdiction-scoped question answering over electrical wiring standards.
//!
//! Regimate provides:
//! - Query resolution engine mapping (question, region) to an answer with citation
//! - Static region catalog of supported countries and their subdivisions
//! - SQLite-backed preference stores (region, answer settings, theme, auth, favorites)
//! - Single-writer persistence queue: in-memory state is authoritative, durable
//!   writes are serialized and best-effort

pub mod record;
pub mod region;
pub mod storage;
pub mod prefs;
pub mod resolver;
pub mod assistant;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{AnswerRecord, AnswerSettings, AnswerSettingsPatch, ThemeMode, VerbosityLevel};
pub use region::{Region, RegionCatalog};
pub use storage::SqliteStore;
pub use prefs::Prefs;
pub use resolver::{AnswerBackend, CannedBackend, Resolution, Resolver};
pub use assistant::Assistant;

/// Result type alias for Regimate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Regimate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("A favorite with id {0} already exists")]
    DuplicateId(String),

    #[error("{state:?} is not a subdivision of {country:?}")]
    InvalidRegion { country: String, state: String },

    #[error("Preference store is closed")]
    StoreClosed,

    #[error("Answer backend unavailable: {0}")]
    ResolutionUnavailable(String),
}
