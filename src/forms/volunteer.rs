//! Volunteer Application Form

use uuid::Uuid;

use crate::api::client::DocumentPart;
use crate::domain::application::VolunteerPayload;
use crate::forms::attachment::Attachment;
use crate::forms::stepper::{FormFields, StepDef, Stepper};

/// Step layout of the volunteer application
pub const VOLUNTEER_STEPS: &[StepDef] = &[
    StepDef {
        name: "datos-personales",
        required: &["cedula", "nombre", "apellidos", "telefono", "correo"],
    },
    StepDef {
        name: "voluntariado",
        required: &["areaInteres"],
    },
    StepDef {
        name: "documentos",
        required: &[],
    },
];

/// Working state of one volunteer application
#[derive(Debug, Clone, Default)]
pub struct VolunteerForm {
    /// Scalar entries
    pub fields: FormFields,
    /// Identity document slot
    pub cedula_doc: Option<Attachment>,
}

impl VolunteerForm {
    /// Stepper positioned on step 1
    pub fn stepper() -> Stepper {
        Stepper::new(VOLUNTEER_STEPS.to_vec())
    }

    /// Assemble the submission payload
    pub fn build_payload(&self) -> VolunteerPayload {
        VolunteerPayload {
            cedula: self.fields.text("cedula"),
            nombre: self.fields.text("nombre"),
            apellidos: self.fields.text("apellidos"),
            telefono: self.fields.text("telefono"),
            correo: self.fields.text("correo"),
            solicitud_id: Uuid::new_v4().to_string(),
            area_interes: self.fields.text("areaInteres"),
            disponibilidad: self.fields.text("disponibilidad"),
            motivacion: self.fields.text("motivacion"),
        }
    }

    /// Populated document slots as multipart parts
    pub fn attachments(&self) -> Vec<DocumentPart> {
        self.cedula_doc
            .clone()
            .map(|doc| vec![doc.into_part("cedulaDoc")])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_optional_strings_omitted_from_json() {
        let mut form = VolunteerForm::default();
        form.fields.set_text("cedula", "8-1-1");
        form.fields.set_text("nombre", "Ana");

        let json = serde_json::to_value(form.build_payload()).expect("serialize");
        assert!(json.get("motivacion").is_none());
        assert!(json.get("areaInteres").is_none());
        assert_eq!(json["cedula"], "8-1-1");
    }

    #[test]
    fn test_second_step_requires_interest_area() {
        let mut stepper = VolunteerForm::stepper();
        let mut fields = FormFields::new();
        fields.set_text("cedula", "8-1-1");
        fields.set_text("nombre", "Ana");
        fields.set_text("apellidos", "Ríos");
        fields.set_text("telefono", "6000");
        fields.set_text("correo", "ana@example.com");

        stepper.next(&fields).expect("step 1 valid");
        assert!(stepper.next(&fields).is_err());

        fields.set_text("areaInteres", "Eventos");
        assert_eq!(stepper.next(&fields).expect("step 2 valid"), 3);
    }
}
