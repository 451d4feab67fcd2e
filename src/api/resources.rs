//! REST Resource Catalog
//!
//! Paths for every backend resource, and the synced-resource bindings that
//! tie a content endpoint to its push-event name.

use crate::domain::record::Record;
use crate::domain::{AboutUsSection, EventRecord, FaqEntry, ServiceOffer};

/// REST paths, relative to the API base URL
pub mod paths {
    pub const ABOUT_US: &str = "about-us";
    pub const EVENTS: &str = "events";
    pub const SERVICES: &str = "services";
    pub const FAQ: &str = "faq";
    pub const ASSOCIATES: &str = "associates";
    pub const VOLUNTEERS: &str = "volunteers";
    pub const FINCAS: &str = "fincas";
    pub const HATOS: &str = "hatos";
    pub const FORRAJES: &str = "forrajes";
    pub const GEOGRAFIAS: &str = "geografias";
    pub const PROPIETARIOS: &str = "propietarios";
    pub const REGISTROS_PRODUCTIVOS: &str = "registros-productivos";
    pub const FUENTES_AGUA: &str = "fuentes-agua";
    pub const METODOS_RIEGO: &str = "metodos-riego";
}

/// A list resource kept live through the push channel
pub trait SyncedResource {
    /// Record type held in the collection
    type Item: Record;
    /// REST path for the initial fetch
    const PATH: &'static str;
    /// Push-event name (one channel per resource type)
    const EVENT: &'static str;
}

pub struct AboutUs;
impl SyncedResource for AboutUs {
    type Item = AboutUsSection;
    const PATH: &'static str = paths::ABOUT_US;
    const EVENT: &'static str = "about-us";
}

pub struct Events;
impl SyncedResource for Events {
    type Item = EventRecord;
    const PATH: &'static str = paths::EVENTS;
    const EVENT: &'static str = "events";
}

pub struct Services;
impl SyncedResource for Services {
    type Item = ServiceOffer;
    const PATH: &'static str = paths::SERVICES;
    const EVENT: &'static str = "services";
}

pub struct Faq;
impl SyncedResource for Faq {
    type Item = FaqEntry;
    const PATH: &'static str = paths::FAQ;
    const EVENT: &'static str = "faq";
}
