//! Durable preference stores
//!
//! [`Prefs`] puts the SQLite store behind a single writer task. Every write
//! flows through one FIFO queue and is applied in submission order, so no
//! two writes to the same key can race on the backing store. Callers never
//! wait on durable I/O: each domain store keeps its in-memory value as the
//! source of truth for the session and enqueues a best-effort write on
//! change. A failed write is logged and counted, never propagated.

pub mod favorites;
pub mod stores;

pub use favorites::FavoritesStore;
pub use stores::{AuthStore, RegionStore, SettingsStore, ThemeStore};

use crate::storage::SqliteStore;
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};

/// Well-known persistence keys.
pub mod keys {
    /// Selected jurisdiction, JSON [`crate::Region`]
    pub const REGION: &str = "region";
    /// Display settings, JSON [`crate::AnswerSettings`]
    pub const ANSWER_SETTINGS: &str = "answerSettings";
    /// Theme sentinel, raw `"dark"` or `"light"`
    pub const THEME_PREF: &str = "themePref";
    /// Auth-skip sentinel, raw `"true"` when set
    pub const AUTH_SKIPPED: &str = "authSkipped";
    /// Saved answers, JSON array of [`crate::AnswerRecord`]
    pub const FAVORITES: &str = "favorites";
}

enum Op {
    Save {
        key: String,
        value: String,
    },
    Delete {
        key: String,
    },
    Load {
        key: String,
        reply: oneshot::Sender<Result<Option<String>>>,
    },
    Flush {
        ack: oneshot::Sender<()>,
    },
}

/// Handle to the preference store writer task.
///
/// Cheap to clone; all clones share one queue. The writer exits once the
/// last clone is dropped and the queue has drained.
#[derive(Clone)]
pub struct Prefs {
    tx: mpsc::UnboundedSender<Op>,
    failed_writes: Arc<AtomicU64>,
}

impl Prefs {
    /// Open a database file and start the writer task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::spawn(SqliteStore::open(path)?))
    }

    /// In-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::spawn(SqliteStore::open_in_memory()?))
    }

    fn spawn(store: SqliteStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let failed_writes = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&failed_writes);
        tokio::task::spawn_blocking(move || writer_loop(store, rx, counter));
        Self { tx, failed_writes }
    }

    /// Load the raw text record under `key`, `None` when never written.
    ///
    /// The request goes through the writer queue, so a load observes every
    /// write enqueued before it.
    pub async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Op::Load {
                key: key.to_string(),
                reply,
            })
            .map_err(|_| Error::StoreClosed)?;
        rx.await.map_err(|_| Error::StoreClosed)?
    }

    /// Enqueue a raw write. Fire-and-forget: a failure is logged and counted,
    /// and the caller's in-memory value stays authoritative.
    pub fn save_raw(&self, key: &str, value: impl Into<String>) {
        let op = Op::Save {
            key: key.to_string(),
            value: value.into(),
        };
        if self.tx.send(op).is_err() {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(key, "preference store closed, dropping write");
        }
    }

    /// Enqueue a delete. Fire-and-forget; absent keys are a no-op.
    pub fn delete(&self, key: &str) {
        let op = Op::Delete {
            key: key.to_string(),
        };
        if self.tx.send(op).is_err() {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(key, "preference store closed, dropping delete");
        }
    }

    /// Load and deserialize the JSON record under `key`
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.load_raw(key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serialize and enqueue a JSON write
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.save_raw(key, text);
        Ok(())
    }

    /// Wait until every previously enqueued write has been applied.
    ///
    /// Call before process exit so pending writes reach disk.
    pub async fn flush(&self) -> Result<()> {
        let (ack, rx) = oneshot::channel();
        self.tx
            .send(Op::Flush { ack })
            .map_err(|_| Error::StoreClosed)?;
        rx.await.map_err(|_| Error::StoreClosed)
    }

    /// Number of writes that failed to reach durable storage this session
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

fn writer_loop(
    store: SqliteStore,
    mut rx: mpsc::UnboundedReceiver<Op>,
    failed_writes: Arc<AtomicU64>,
) {
    while let Some(op) = rx.blocking_recv() {
        match op {
            Op::Save { key, value } => {
                if let Err(e) = store.save(&key, &value) {
                    failed_writes.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(key = %key, error = %e, "preference write failed");
                }
            }
            Op::Delete { key } => {
                if let Err(e) = store.delete(&key) {
                    failed_writes.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(key = %key, error = %e, "preference delete failed");
                }
            }
            Op::Load { key, reply } => {
                let _ = reply.send(store.load(&key));
            }
            Op::Flush { ack } => {
                let _ = ack.send(());
            }
        }
    }
}
