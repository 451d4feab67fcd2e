//! ServiceOffer - Services the Association Provides to Members

use serde::{Deserialize, Serialize};

use crate::domain::record::{Record, RecordId};

/// A service listed on the services page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffer {
    /// Service identifier
    pub id: RecordId,
    /// Service name
    pub titulo: String,
    /// Service description
    #[serde(default)]
    pub descripcion: String,
    /// Optional icon/illustration URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icono: Option<String>,
}

impl Record for ServiceOffer {
    fn id(&self) -> RecordId {
        self.id.clone()
    }
}
