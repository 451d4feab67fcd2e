//! Event - Association Events (talleres, subastas, ferias)

use serde::{Deserialize, Serialize};

use crate::domain::record::{Record, RecordId};

/// A published association event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Event identifier
    pub id: RecordId,
    /// Event title
    pub titulo: String,
    /// Event description
    #[serde(default)]
    pub descripcion: String,
    /// Scheduled date (display string from the backend)
    #[serde(default)]
    pub fecha: String,
    /// Illustration URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilustracion: Option<String>,
}

impl EventRecord {
    /// Whether this event is an auction (promoted to the front of listings)
    pub fn is_subasta(&self) -> bool {
        self.titulo.to_lowercase().contains("subasta")
    }
}

impl Record for EventRecord {
    fn id(&self) -> RecordId {
        self.id.clone()
    }

    /// Auctions first, everything else in arrival order (stable)
    fn reorder(records: &mut Vec<Self>) {
        records.sort_by_key(|e| !e.is_subasta());
    }
}
