//! Multi-step application forms: navigation, validation, assembly, submission

pub mod associate;
pub mod attachment;
pub mod lookup;
pub mod stepper;
pub mod submit;
pub mod volunteer;

pub use associate::AssociateForm;
pub use attachment::{attach, Attachment};
pub use lookup::LookupDebouncer;
pub use stepper::{FieldValue, FormFields, StepDef, Stepper};
pub use submit::{submit_associate, submit_volunteer};
pub use volunteer::VolunteerForm;
