//! Domain types: content records and application payloads

pub mod about_us;
pub mod application;
pub mod event;
pub mod faq;
pub mod record;
pub mod service_offer;

pub use about_us::AboutUsSection;
pub use application::{
    AssociatePayload, Finca, Forraje, FuenteAgua, Geografia, Hato, MetodoRiego, Propietario,
    RegistroProductivo, Section, UnidadFamiliar, VolunteerPayload,
};
pub use event::EventRecord;
pub use faq::FaqEntry;
pub use record::{Record, RecordId};
pub use service_offer::ServiceOffer;
