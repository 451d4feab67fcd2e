//! AboutUs - Association Presentation Sections

use serde::{Deserialize, Serialize};

use crate::domain::record::{Record, RecordId};

/// One section of the about-us page (mission, vision, history, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUsSection {
    /// Section identifier
    pub id: RecordId,
    /// Section heading
    pub titulo: String,
    /// Body text
    pub descripcion: String,
    /// Optional illustration URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
}

impl Record for AboutUsSection {
    fn id(&self) -> RecordId {
        self.id.clone()
    }
}
