//! Injectable persistence backends for the knowledge collection.
//!
//! The store reads the whole collection once at startup and replaces it on
//! every mutation: one JSON array under a fixed key, the durable analogue of
//! a browser local-storage slot. Sled carries the durable case; the in-memory
//! backend runs the same serialize/parse path for tests and embedders.

use super::{KbEntry, StoreError};
use std::path::Path;
use std::sync::RwLock;

/// Key under which the serialized entry collection lives.
pub const STORAGE_KEY: &str = "research-hub-kb-items";

/// Load/save seam for the knowledge collection.
///
/// `load` reports a malformed collection as [`StoreError::Parse`]; the store
/// decides how to recover. `save` replaces the whole collection.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Vec<KbEntry>, StoreError>;
    fn save(&self, entries: &[KbEntry]) -> Result<(), StoreError>;
}

/// Sled-backed storage: one JSON array under [`STORAGE_KEY`] in the default tree.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Opens or creates the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl StorageBackend for SledBackend {
    fn load(&self) -> Result<Vec<KbEntry>, StoreError> {
        match self.db.get(STORAGE_KEY)? {
            Some(raw) => Ok(serde_json::from_slice(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[KbEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(entries)?;
        self.db.insert(STORAGE_KEY, raw)?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-process backend holding the same JSON bytes sled would hold.
#[derive(Default)]
pub struct MemoryBackend {
    raw: RwLock<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the stored bytes, e.g. a malformed payload for failure tests.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: RwLock::new(Some(raw.into())),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<KbEntry>, StoreError> {
        let guard = self.raw.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_deref() {
            Some(raw) => Ok(serde_json::from_slice(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[KbEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(entries)?;
        *self.raw.write().unwrap_or_else(|e| e.into_inner()) = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KbSections;
    use chrono::Utc;

    fn entry(id: &str, application_name: &str) -> KbEntry {
        KbEntry {
            id: id.to_string(),
            application_name: application_name.to_string(),
            category_domain: "Banking".to_string(),
            module_sub_domain: String::new(),
            functional_component: String::new(),
            created_at: Utc::now(),
            sections: KbSections {
                overview: "A lending platform".to_string(),
                ..KbSections::default()
            },
        }
    }

    #[test]
    fn sled_round_trip_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let saved = vec![entry("kb-1-a", "Loan Origination"), entry("kb-2-b", "Collections")];

        let backend = SledBackend::open(dir.path()).unwrap();
        backend.save(&saved).unwrap();
        drop(backend);

        let reopened = SledBackend::open(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), saved);
    }

    #[test]
    fn sled_load_on_fresh_db_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SledBackend::open(dir.path()).unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn timestamps_survive_as_iso_8601() {
        let saved = vec![entry("kb-3-c", "Treasury")];
        let raw = serde_json::to_vec(&saved).unwrap();
        let text = String::from_utf8(raw.clone()).unwrap();
        assert!(text.contains("\"createdAt\""));

        let loaded: Vec<KbEntry> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(loaded[0].created_at, saved[0].created_at);
    }

    #[test]
    fn memory_backend_reports_malformed_payload_as_parse_error() {
        let backend = MemoryBackend::with_raw(&b"{not json"[..]);
        assert!(matches!(backend.load(), Err(StoreError::Parse(_))));
    }

    #[test]
    fn persisted_layout_uses_camel_case_field_names() {
        let saved = vec![entry("kb-4-d", "Payments")];
        let value: serde_json::Value = serde_json::to_value(&saved).unwrap();
        let obj = &value[0];
        assert!(obj.get("applicationName").is_some());
        assert!(obj.get("categoryDomain").is_some());
        assert!(obj["sections"].get("functionalRequirements").is_some());
    }
}
