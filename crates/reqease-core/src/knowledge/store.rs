//! Append-only knowledge store with write-through persistence.

use super::backend::StorageBackend;
use super::{KbDraft, KbEntry, KbEvent, StoreError};
use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default number of entries returned by recent listings.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Append-only collection of [`KbEntry`] records, newest first.
///
/// Construct once at startup and pass to consumers by reference; the
/// collection lives for the process lifetime. Every mutation writes the whole
/// collection through to the backend and emits a [`KbEvent`] to subscribers.
pub struct KbStore {
    backend: Box<dyn StorageBackend>,
    entries: Vec<KbEntry>,
    events: broadcast::Sender<KbEvent>,
}

impl KbStore {
    /// Opens the store over `backend`, loading the persisted collection.
    ///
    /// A malformed persisted collection is logged and discarded so the store
    /// starts empty instead of failing; other backend errors propagate.
    pub fn open(backend: impl StorageBackend + 'static) -> Result<Self, StoreError> {
        let entries = match backend.load() {
            Ok(entries) => entries,
            Err(StoreError::Parse(e)) => {
                tracing::warn!("discarding malformed knowledge collection: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            backend: Box::new(backend),
            entries,
            events,
        })
    }

    /// Stamps `draft` with a fresh id and creation time, prepends it to the
    /// collection, and writes the collection through to the backend.
    ///
    /// Returns the generated id. A write failure is logged, not returned: the
    /// entry stays visible for the rest of the session either way.
    pub fn add_entry(&mut self, draft: KbDraft) -> String {
        let entry = KbEntry {
            id: generate_id(),
            application_name: draft.application_name,
            category_domain: draft.category_domain,
            module_sub_domain: draft.module_sub_domain,
            functional_component: draft.functional_component,
            created_at: Utc::now(),
            sections: draft.sections,
        };
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        if let Err(e) = self.backend.save(&self.entries) {
            tracing::error!("knowledge write-through failed: {e}");
        }
        let _ = self.events.send(KbEvent::EntryAdded { id: id.clone() });
        id
    }

    /// Looks up an entry by id. Absence is not an error.
    pub fn entry(&self, id: &str) -> Option<&KbEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The `limit` most recent entries, newest first. A limit beyond the
    /// collection size returns everything.
    pub fn recent(&self, limit: usize) -> &[KbEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subscribes to change notifications. Consumers re-read the current
    /// snapshot on each event.
    pub fn subscribe(&self) -> broadcast::Receiver<KbEvent> {
        self.events.subscribe()
    }
}

/// `kb-<unix millis>-<random suffix>`. The uuid suffix keeps ids distinct
/// even for entries created within the same millisecond.
fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("kb-{}-{}", millis, &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{KbSections, MemoryBackend, SledBackend};
    use std::collections::HashSet;

    fn draft(application_name: &str) -> KbDraft {
        KbDraft {
            application_name: application_name.to_string(),
            category_domain: "Lending".to_string(),
            module_sub_domain: "Collateral".to_string(),
            functional_component: "Valuation".to_string(),
            sections: KbSections {
                overview: "Values pledged silver against live prices".to_string(),
                functional_requirements: "LTV computation, price feeds".to_string(),
                technical_details: String::new(),
                business_rules: "LTV capped at 75%".to_string(),
            },
        }
    }

    #[test]
    fn added_entry_is_readable_with_draft_fields() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        let d = draft("Silver Loans");
        let id = store.add_entry(d.clone());

        let entry = store.entry(&id).expect("entry visible after add");
        assert_eq!(entry.id, id);
        assert_eq!(entry.application_name, d.application_name);
        assert_eq!(entry.category_domain, d.category_domain);
        assert_eq!(entry.module_sub_domain, d.module_sub_domain);
        assert_eq!(entry.functional_component, d.functional_component);
        assert_eq!(entry.sections, d.sections);
    }

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        let mut ids = HashSet::new();
        for _ in 0..100 {
            assert!(ids.insert(store.add_entry(draft("App"))));
        }
        assert!(ids.iter().all(|id| id.starts_with("kb-")));
    }

    #[test]
    fn collection_stays_newest_first() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        store.add_entry(draft("First"));
        store.add_entry(draft("Second"));

        let recent = store.recent(2);
        assert_eq!(recent[0].application_name, "Second");
        assert_eq!(recent[1].application_name, "First");
    }

    #[test]
    fn recent_limit_boundaries() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        store.add_entry(draft("A"));
        store.add_entry(draft("B"));

        assert!(store.recent(0).is_empty());
        assert_eq!(store.recent(50).len(), 2);
        assert_eq!(store.recent(DEFAULT_RECENT_LIMIT).len(), 2);
    }

    #[test]
    fn unknown_id_is_absence_not_error() {
        let store = KbStore::open(MemoryBackend::new()).unwrap();
        assert!(store.entry("kb-0-missing").is_none());
    }

    #[test]
    fn malformed_persisted_collection_falls_back_to_empty() {
        let store = KbStore::open(MemoryBackend::with_raw(&b"[{\"id\": oops"[..])).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn entries_survive_a_reopen_through_sled() {
        let dir = tempfile::tempdir().unwrap();
        let saved;
        {
            let mut store = KbStore::open(SledBackend::open(dir.path()).unwrap()).unwrap();
            store.add_entry(draft("Persisted App"));
            store.add_entry(draft("Another App"));
            saved = store.recent(usize::MAX).to_vec();
        }

        let store = KbStore::open(SledBackend::open(dir.path()).unwrap()).unwrap();
        assert_eq!(store.recent(usize::MAX), saved.as_slice());
    }

    #[test]
    fn add_emits_a_change_event() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        let mut events = store.subscribe();
        let id = store.add_entry(draft("Notify Me"));

        let KbEvent::EntryAdded { id: event_id } = events.try_recv().unwrap();
        assert_eq!(event_id, id);
    }

    #[test]
    fn add_without_subscribers_does_not_panic() {
        let mut store = KbStore::open(MemoryBackend::new()).unwrap();
        store.add_entry(draft("No Listeners"));
        assert_eq!(store.len(), 1);
    }
}
