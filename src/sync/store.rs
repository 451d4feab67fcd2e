//! RecordStore - Reactive Cache Slot
//!
//! Holds the merged collection for one record type and notifies watchers on
//! every change. The store is a derived projection of server state: a full
//! refetch replaces it wholesale, push events mutate it through the merger.

use tokio::sync::watch;

use crate::domain::record::Record;
use crate::sync::event::RecordEvent;
use crate::sync::merge::merge;

/// Load phase of a store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Initial fetch in flight
    #[default]
    Loading,
    /// Initial fetch resolved
    Ready,
    /// Initial fetch failed; records hold the previous value (empty on first load)
    Failed(String),
}

/// Point-in-time view of a store
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    /// Current merged collection, in display order
    pub records: Vec<T>,
    /// Load phase
    pub phase: LoadPhase,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            phase: LoadPhase::default(),
        }
    }
}

/// Reactive cache for one record type
#[derive(Debug)]
pub struct RecordStore<T: Record> {
    tx: watch::Sender<Snapshot<T>>,
}

impl<T: Record> RecordStore<T> {
    /// Create an empty store in the Loading phase
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Snapshot::default());
        Self { tx }
    }

    /// Current snapshot (cloned)
    pub fn snapshot(&self) -> Snapshot<T> {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn watch(&self) -> watch::Receiver<Snapshot<T>> {
        self.tx.subscribe()
    }

    /// Apply one push event through the merger
    pub fn apply(&self, event: &RecordEvent<T>) {
        self.tx.send_modify(|snap| {
            snap.records = merge(&snap.records, event);
        });
    }

    /// Replace the whole collection (fetch resolution); reapplies the
    /// type's display-order rule
    pub fn replace_all(&self, mut records: Vec<T>) {
        T::reorder(&mut records);
        self.tx.send_modify(|snap| {
            snap.records = records;
            snap.phase = LoadPhase::Ready;
        });
    }

    /// Mark the initial fetch as in flight
    pub fn mark_loading(&self) {
        self.tx.send_modify(|snap| snap.phase = LoadPhase::Loading);
    }

    /// Mark the initial fetch as failed, keeping whatever records are held
    pub fn mark_failed(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|snap| snap.phase = LoadPhase::Failed(message));
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordId;
    use crate::domain::FaqEntry;

    fn faq(id: i64, pregunta: &str) -> FaqEntry {
        FaqEntry {
            id: RecordId::Number(id),
            pregunta: pregunta.to_string(),
            respuesta: String::new(),
        }
    }

    #[test]
    fn test_starts_loading_and_empty() {
        let store = RecordStore::<FaqEntry>::new();
        let snap = store.snapshot();
        assert!(snap.records.is_empty());
        assert_eq!(snap.phase, LoadPhase::Loading);
    }

    #[test]
    fn test_replace_all_marks_ready() {
        let store = RecordStore::new();
        store.replace_all(vec![faq(1, "a")]);
        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 1);
        assert_eq!(snap.phase, LoadPhase::Ready);
    }

    #[test]
    fn test_failed_keeps_previous_records() {
        let store = RecordStore::new();
        store.replace_all(vec![faq(1, "a")]);
        store.mark_failed("connection reset");
        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 1);
        assert_eq!(snap.phase, LoadPhase::Failed("connection reset".to_string()));
    }

    #[tokio::test]
    async fn test_watch_sees_applied_event() {
        let store = RecordStore::new();
        let mut rx = store.watch();
        store.replace_all(vec![faq(1, "a")]);
        store.apply(&RecordEvent::Created(faq(2, "b")));

        rx.changed().await.expect("watch closed");
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.records.len(), 2);
        assert_eq!(snap.records[0].id.as_number(), Some(2));
    }
}
