//! FAQ - Frequently Asked Questions

use serde::{Deserialize, Serialize};

use crate::domain::record::{Record, RecordId};

/// One question/answer pair on the FAQ page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    /// Entry identifier
    pub id: RecordId,
    /// The question
    pub pregunta: String,
    /// The answer
    pub respuesta: String,
}

impl Record for FaqEntry {
    fn id(&self) -> RecordId {
        self.id.clone()
    }
}
