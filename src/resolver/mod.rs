//! Query resolution engine
//!
//! Maps a natural-language question plus a region into an answer, optionally
//! annotated with a standard identifier and clause reference. Matching is
//! deterministic with a guaranteed fallback: the engine always answers.

pub mod backend;
pub mod engine;
pub mod fallback;

pub use backend::{AnswerBackend, CannedBackend};
pub use engine::{Resolution, Resolver};
