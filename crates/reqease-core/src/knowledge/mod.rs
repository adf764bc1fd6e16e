//! Knowledge base: an append-only collection of saved research articles with
//! write-through persistence.
//!
//! Entries are immutable once created; the only operations are add and read.
//! The collection is always kept newest-first and is persisted in full on
//! every mutation, serialized as one JSON array (timestamps as ISO-8601
//! strings) under a fixed storage key.

mod backend;
mod store;

pub use backend::{MemoryBackend, SledBackend, StorageBackend, STORAGE_KEY};
pub use store::{KbStore, DEFAULT_RECENT_LIMIT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four free-text sections of a knowledge base entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KbSections {
    pub overview: String,
    pub functional_requirements: String,
    pub technical_details: String,
    pub business_rules: String,
}

/// One saved knowledge base article. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KbEntry {
    /// Unique id of the form `kb-<unix millis>-<random suffix>`.
    pub id: String,
    /// Subject application label. Non-empty by caller contract.
    pub application_name: String,
    #[serde(default)]
    pub category_domain: String,
    #[serde(default)]
    pub module_sub_domain: String,
    #[serde(default)]
    pub functional_component: String,
    /// Creation time, stamped by the store.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sections: KbSections,
}

/// A new entry before the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default)]
pub struct KbDraft {
    pub application_name: String,
    pub category_domain: String,
    pub module_sub_domain: String,
    pub functional_component: String,
    pub sections: KbSections,
}

/// Change notification emitted by [`KbStore`] after each mutation.
/// Subscribers re-read the current snapshot rather than carrying state here.
#[derive(Debug, Clone)]
pub enum KbEvent {
    EntryAdded { id: String },
}

/// Errors from the knowledge persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage backend failed to open, read, or write.
    #[error("storage backend: {0}")]
    Backend(#[from] sled::Error),
    /// The persisted collection is not a valid JSON entry array.
    #[error("malformed persisted collection: {0}")]
    Parse(#[from] serde_json::Error),
}
