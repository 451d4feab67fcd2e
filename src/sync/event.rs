//! Record Events
//!
//! Tagged union of the three push-event kinds, decoded from the wire shape
//! `{action, data?, id?}`. A malformed or incomplete message decodes to `None`
//! and the caller treats it as a no-op; content pushes are informational and
//! never abort the feed.

use serde_json::Value;

use crate::domain::record::{Record, RecordId};

/// One push event scoped to a single record type
#[derive(Debug, Clone)]
pub enum RecordEvent<T> {
    /// A record was created server-side
    Created(T),
    /// An existing record was mutated
    Updated(T),
    /// A record was removed, identified only by id
    Deleted(RecordId),
}

impl<T: Record> RecordEvent<T> {
    /// Decode from a channel payload, `None` when the message is unusable
    pub fn decode(payload: &Value) -> Option<Self> {
        let action = payload.get("action")?.as_str()?;
        match action {
            "created" => {
                let data = payload.get("data")?;
                match serde_json::from_value(data.clone()) {
                    Ok(record) => Some(RecordEvent::Created(record)),
                    Err(err) => {
                        tracing::warn!("Dropping undecodable 'created' payload: {err}");
                        None
                    }
                }
            }
            "updated" => {
                let data = payload.get("data")?;
                match serde_json::from_value(data.clone()) {
                    Ok(record) => Some(RecordEvent::Updated(record)),
                    Err(err) => {
                        tracing::warn!("Dropping undecodable 'updated' payload: {err}");
                        None
                    }
                }
            }
            "deleted" => {
                let id = payload.get("id")?;
                serde_json::from_value::<RecordId>(id.clone())
                    .ok()
                    .map(RecordEvent::Deleted)
            }
            other => {
                tracing::warn!("Unknown push action '{other}'");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FaqEntry;
    use serde_json::json;

    #[test]
    fn test_decode_created() {
        let payload = json!({
            "action": "created",
            "data": {"id": 1, "pregunta": "¿Cómo me asocio?", "respuesta": "..."}
        });
        match RecordEvent::<FaqEntry>::decode(&payload) {
            Some(RecordEvent::Created(faq)) => assert_eq!(faq.pregunta, "¿Cómo me asocio?"),
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_decode_deleted_string_id() {
        let payload = json!({"action": "deleted", "id": "42"});
        match RecordEvent::<FaqEntry>::decode(&payload) {
            Some(RecordEvent::Deleted(id)) => assert_eq!(id.as_number(), Some(42)),
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_missing_data_is_dropped() {
        let payload = json!({"action": "created"});
        assert!(RecordEvent::<FaqEntry>::decode(&payload).is_none());

        let payload = json!({"action": "deleted"});
        assert!(RecordEvent::<FaqEntry>::decode(&payload).is_none());
    }

    #[test]
    fn test_unknown_action_is_dropped() {
        let payload = json!({"action": "archived", "id": 1});
        assert!(RecordEvent::<FaqEntry>::decode(&payload).is_none());
    }
}
