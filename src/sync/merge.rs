//! Cache Merger
//!
//! Pure application of one push event to one collection. The input is never
//! mutated; reactive bindings rely on getting a fresh sequence on every change.
//!
//! Semantics:
//! - `created`: last-write-wins; any record with the same id is dropped
//!   before the new one is prepended, so ids stay unique.
//! - `updated`: replaces the first record with a matching id in place;
//!   an unknown id leaves the collection untouched (no insert-on-update).
//! - `deleted`: removes every record whose id matches under normalized
//!   (numeric-or-string) comparison.
//!
//! After every merge the record type's display-order rule is reapplied to the
//! whole sequence, not just the changed record.

use crate::domain::record::Record;
use crate::sync::event::RecordEvent;

/// Apply one event to a collection, producing the next collection
pub fn merge<T: Record>(current: &[T], event: &RecordEvent<T>) -> Vec<T> {
    let mut next: Vec<T> = match event {
        RecordEvent::Created(record) => {
            let id = record.id();
            let mut out = Vec::with_capacity(current.len() + 1);
            out.push(record.clone());
            out.extend(current.iter().filter(|r| !r.id().matches(&id)).cloned());
            out
        }
        RecordEvent::Updated(record) => {
            let id = record.id();
            let mut out: Vec<T> = current.to_vec();
            if let Some(slot) = out.iter_mut().find(|r| r.id().matches(&id)) {
                *slot = record.clone();
            }
            out
        }
        RecordEvent::Deleted(id) => current
            .iter()
            .filter(|r| !r.id().matches(id))
            .cloned()
            .collect(),
    };
    T::reorder(&mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordId;
    use crate::domain::{EventRecord, FaqEntry};

    fn faq(id: i64, pregunta: &str) -> FaqEntry {
        FaqEntry {
            id: RecordId::Number(id),
            pregunta: pregunta.to_string(),
            respuesta: String::new(),
        }
    }

    fn ids(records: &[FaqEntry]) -> Vec<Option<i64>> {
        records.iter().map(|r| r.id.as_number()).collect()
    }

    #[test]
    fn test_created_prepends() {
        let current = vec![faq(1, "a"), faq(2, "b")];
        let next = merge(&current, &RecordEvent::Created(faq(3, "c")));
        assert_eq!(ids(&next), vec![Some(3), Some(1), Some(2)]);
        assert_eq!(next.len(), current.len() + 1);
        // input untouched
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn test_created_duplicate_id_is_last_write_wins() {
        let current = vec![faq(1, "old"), faq(2, "b")];
        let next = merge(&current, &RecordEvent::Created(faq(1, "new")));
        assert_eq!(ids(&next), vec![Some(1), Some(2)]);
        assert_eq!(next[0].pregunta, "new");
    }

    #[test]
    fn test_updated_replaces_in_place() {
        let current = vec![faq(1, "a"), faq(2, "b"), faq(3, "c")];
        let next = merge(&current, &RecordEvent::Updated(faq(2, "B")));
        assert_eq!(ids(&next), ids(&current));
        assert_eq!(next[1].pregunta, "B");
    }

    #[test]
    fn test_updated_unknown_id_is_noop() {
        let current = vec![faq(1, "a")];
        let next = merge(&current, &RecordEvent::Updated(faq(9, "x")));
        assert_eq!(ids(&next), ids(&current));
        assert_eq!(next[0].pregunta, "a");
    }

    #[test]
    fn test_updated_is_idempotent() {
        let current = vec![faq(1, "a"), faq(2, "b")];
        let event = RecordEvent::Updated(faq(2, "B"));
        let once = merge(&current, &event);
        let twice = merge(&once, &event);
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(once[1].pregunta, twice[1].pregunta);
    }

    #[test]
    fn test_deleted_removes_by_normalized_id() {
        let current = vec![faq(1, "a"), faq(2, "b")];
        // string id on the wire, numeric id in the cache
        let next = merge(&current, &RecordEvent::Deleted(RecordId::Text("2".into())));
        assert_eq!(ids(&next), vec![Some(1)]);
    }

    #[test]
    fn test_deleted_unknown_id_is_noop() {
        let current = vec![faq(1, "a")];
        let next = merge(&current, &RecordEvent::Deleted(RecordId::Number(99)));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_reorder_reapplied_after_merge() {
        let taller = EventRecord {
            id: RecordId::Number(1),
            titulo: "Taller".to_string(),
            descripcion: String::new(),
            fecha: String::new(),
            ilustracion: None,
        };
        let subasta = EventRecord {
            id: RecordId::Number(2),
            titulo: "Subasta X".to_string(),
            ..taller.clone()
        };
        // created event for a non-subasta still lands behind the subasta
        let current = vec![subasta];
        let next = merge(&current, &RecordEvent::Created(taller));
        assert_eq!(next[0].id.as_number(), Some(2));
        assert_eq!(next[1].id.as_number(), Some(1));
    }
}
