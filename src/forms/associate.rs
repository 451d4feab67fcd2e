//! Associate Application Form
//!
//! Flat working state for the associate intake: scalar entries in
//! `FormFields`, repeatable sections as typed lists, attachments in optional
//! slots. The nested submission payload is assembled only at final
//! submission, and optional sections are included only when something
//! meaningful was entered.

use uuid::Uuid;

use crate::api::client::DocumentPart;
use crate::domain::application::{
    AssociatePayload, Finca, Forraje, FuenteAgua, Geografia, Hato, MetodoRiego, Propietario,
    RegistroProductivo, Section, UnidadFamiliar,
};
use crate::forms::attachment::Attachment;
use crate::forms::stepper::{FormFields, StepDef, Stepper};

/// Step layout of the associate application
pub const ASSOCIATE_STEPS: &[StepDef] = &[
    StepDef {
        name: "datos-personales",
        required: &["cedula", "nombre", "apellidos", "telefono", "correo"],
    },
    StepDef {
        name: "finca",
        required: &[],
    },
    StepDef {
        name: "produccion",
        required: &[],
    },
    StepDef {
        name: "documentos",
        required: &[],
    },
];

/// Working state of one associate application
#[derive(Debug, Clone, Default)]
pub struct AssociateForm {
    /// Scalar entries (personal data, finca fields, geography)
    pub fields: FormFields,
    /// Family-unit numbers
    pub unidad_familiar: UnidadFamiliar,
    /// Repeatable sections
    pub hatos: Vec<Hato>,
    pub forrajes: Vec<Forraje>,
    pub fuentes_agua: Vec<FuenteAgua>,
    pub metodos_riego: Vec<MetodoRiego>,
    pub propietarios: Vec<Propietario>,
    pub registros_productivos: Vec<RegistroProductivo>,
    /// Document slots
    pub cedula_doc: Option<Attachment>,
    pub titulo_doc: Option<Attachment>,
}

impl AssociateForm {
    /// Stepper positioned on step 1
    pub fn stepper() -> Stepper {
        Stepper::new(ASSOCIATE_STEPS.to_vec())
    }

    fn finca(&self) -> Finca {
        Finca {
            nombre: self.fields.text("fincaNombre"),
            vereda: self.fields.text("fincaVereda"),
            hectareas: self
                .fields
                .text("fincaHectareas")
                .parse()
                .unwrap_or_default(),
            tenencia: self.fields.text("fincaTenencia"),
        }
    }

    fn geografia(&self) -> Geografia {
        Geografia {
            departamento: self.fields.text("departamento"),
            municipio: self.fields.text("municipio"),
            corregimiento: self.fields.text("corregimiento"),
        }
    }

    /// Assemble the sparse submission payload
    pub fn build_payload(&self) -> AssociatePayload {
        AssociatePayload {
            cedula: self.fields.text("cedula"),
            nombre: self.fields.text("nombre"),
            apellidos: self.fields.text("apellidos"),
            telefono: self.fields.text("telefono"),
            correo: self.fields.text("correo"),
            direccion: self.fields.text("direccion"),
            solicitud_id: Uuid::new_v4().to_string(),
            finca: keep_section(self.finca()),
            geografia: keep_section(self.geografia()),
            unidad_familiar: keep_section(self.unidad_familiar.clone()),
            hatos: keep_entries(&self.hatos),
            forrajes: keep_entries(&self.forrajes),
            fuentes_agua: keep_entries(&self.fuentes_agua),
            metodos_riego: keep_entries(&self.metodos_riego),
            propietarios: keep_entries(&self.propietarios),
            registros_productivos: keep_entries(&self.registros_productivos),
        }
    }

    /// Populated document slots as multipart parts
    pub fn attachments(&self) -> Vec<DocumentPart> {
        let mut parts = Vec::new();
        if let Some(doc) = self.cedula_doc.clone() {
            parts.push(doc.into_part("cedulaDoc"));
        }
        if let Some(doc) = self.titulo_doc.clone() {
            parts.push(doc.into_part("tituloDoc"));
        }
        parts
    }
}

/// Keep an optional section only when it carries a meaningful value
pub(crate) fn keep_section<S: Section>(section: S) -> Option<S> {
    section.is_meaningful().then_some(section)
}

/// Keep only the meaningful entries of a repeatable section
pub(crate) fn keep_entries<S: Section + Clone>(entries: &[S]) -> Vec<S> {
    entries.iter().filter(|e| e.is_meaningful()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AssociateForm {
        let mut form = AssociateForm::default();
        form.fields.set_text("cedula", "8-123-456");
        form.fields.set_text("nombre", "Juan");
        form.fields.set_text("apellidos", "Pérez");
        form.fields.set_text("telefono", "6000-0000");
        form.fields.set_text("correo", "juan@example.com");
        form
    }

    #[test]
    fn test_empty_optional_sections_omitted() {
        let payload = filled_form().build_payload();
        assert!(payload.finca.is_none());
        assert!(payload.unidad_familiar.is_none());
        assert!(payload.forrajes.is_empty());

        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json.get("forrajes").is_none());
        assert!(json.get("finca").is_none());
    }

    #[test]
    fn test_meaningful_forraje_included() {
        let mut form = filled_form();
        form.forrajes.push(Forraje {
            tipo_forraje: "Pasto".to_string(),
            variedad: "X".to_string(),
            hectareas: 2.0,
            utilizacion: "Pastoreo".to_string(),
        });
        // an all-empty row entered by the UI is dropped
        form.forrajes.push(Forraje::default());

        let payload = form.build_payload();
        assert_eq!(payload.forrajes.len(), 1);
        assert_eq!(payload.forrajes[0].tipo_forraje, "Pasto");
    }

    #[test]
    fn test_finca_included_when_any_field_set() {
        let mut form = filled_form();
        form.fields.set_text("fincaNombre", "La Esperanza");
        let payload = form.build_payload();
        assert_eq!(
            payload.finca.map(|f| f.nombre),
            Some("La Esperanza".to_string())
        );
    }

    #[test]
    fn test_attachments_only_for_populated_slots() {
        let mut form = filled_form();
        assert!(form.attachments().is_empty());

        form.cedula_doc = Some(
            Attachment::select("cedula.jpg", "image/jpeg", vec![1, 2, 3]).expect("attach"),
        );
        let parts = form.attachments();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].field, "cedulaDoc");
    }

    #[test]
    fn test_each_payload_gets_fresh_correlation_id() {
        let form = filled_form();
        let a = form.build_payload();
        let b = form.build_payload();
        assert_ne!(a.solicitud_id, b.solicitud_id);
    }
}
