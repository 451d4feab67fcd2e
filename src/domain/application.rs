//! Application Payloads - Associate and Volunteer Intake
//!
//! Nested submission shapes for the two intake forms. Optional sections are
//! omitted from the serialized payload entirely when nothing meaningful was
//! entered (sparse-payload policy), so every optional field here carries
//! `skip_serializing_if`.

use serde::{Deserialize, Serialize};

/// A form section that may be left out of the submission payload
///
/// A section is meaningful when at least one sub-field holds a non-empty
/// string or a non-zero number.
pub trait Section {
    fn is_meaningful(&self) -> bool;
}

fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Farm (finca) description
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finca {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub vereda: String,
    #[serde(default)]
    pub hectareas: f64,
    #[serde(default)]
    pub tenencia: String,
}

impl Section for Finca {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.nombre)
            || non_empty(&self.vereda)
            || non_empty(&self.tenencia)
            || self.hectareas > 0.0
    }
}

/// Herd (hato) composition entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hato {
    #[serde(default)]
    pub tipo_ganado: String,
    #[serde(default)]
    pub raza: String,
    #[serde(default)]
    pub cantidad: u32,
}

impl Section for Hato {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.tipo_ganado) || non_empty(&self.raza) || self.cantidad > 0
    }
}

/// Forage (forraje) record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Forraje {
    #[serde(default)]
    pub tipo_forraje: String,
    #[serde(default)]
    pub variedad: String,
    #[serde(default)]
    pub hectareas: f64,
    #[serde(default)]
    pub utilizacion: String,
}

impl Section for Forraje {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.tipo_forraje)
            || non_empty(&self.variedad)
            || non_empty(&self.utilizacion)
            || self.hectareas > 0.0
    }
}

/// Water source (fuente de agua) entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuenteAgua {
    #[serde(default)]
    pub tipo_fuente: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub disponibilidad: String,
}

impl Section for FuenteAgua {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.tipo_fuente) || non_empty(&self.nombre) || non_empty(&self.disponibilidad)
    }
}

/// Irrigation method (método de riego) entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetodoRiego {
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub cobertura_hectareas: f64,
}

impl Section for MetodoRiego {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.tipo) || self.cobertura_hectareas > 0.0
    }
}

/// Co-owner (propietario) of the farm
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Propietario {
    #[serde(default)]
    pub cedula: String,
    #[serde(default)]
    pub nombre: String,
}

impl Section for Propietario {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.cedula) || non_empty(&self.nombre)
    }
}

/// Production record (registro productivo)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistroProductivo {
    #[serde(default)]
    pub producto: String,
    #[serde(default)]
    pub litros_dia: f64,
    #[serde(default)]
    pub destino: String,
}

impl Section for RegistroProductivo {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.producto) || non_empty(&self.destino) || self.litros_dia > 0.0
    }
}

/// Family unit (unidad familiar) information
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnidadFamiliar {
    #[serde(default)]
    pub personas_a_cargo: u32,
    #[serde(default)]
    pub menores_de_edad: u32,
    #[serde(default)]
    pub observaciones: String,
}

impl Section for UnidadFamiliar {
    fn is_meaningful(&self) -> bool {
        self.personas_a_cargo > 0 || self.menores_de_edad > 0 || non_empty(&self.observaciones)
    }
}

/// Geographic location (geografía) of the farm
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Geografia {
    #[serde(default)]
    pub departamento: String,
    #[serde(default)]
    pub municipio: String,
    #[serde(default)]
    pub corregimiento: String,
}

impl Section for Geografia {
    fn is_meaningful(&self) -> bool {
        non_empty(&self.departamento)
            || non_empty(&self.municipio)
            || non_empty(&self.corregimiento)
    }
}

/// Full associate application as POSTed to the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatePayload {
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: String,
    pub correo: String,
    pub direccion: String,
    /// Client correlation id, lets the backend dedup resubmissions
    pub solicitud_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finca: Option<Finca>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geografia: Option<Geografia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidad_familiar: Option<UnidadFamiliar>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hatos: Vec<Hato>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub forrajes: Vec<Forraje>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fuentes_agua: Vec<FuenteAgua>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub metodos_riego: Vec<MetodoRiego>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub propietarios: Vec<Propietario>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub registros_productivos: Vec<RegistroProductivo>,
}

/// Full volunteer application as POSTed to the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPayload {
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: String,
    pub correo: String,
    /// Client correlation id, lets the backend dedup resubmissions
    pub solicitud_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub area_interes: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub disponibilidad: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub motivacion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sections_are_not_meaningful() {
        assert!(!Finca::default().is_meaningful());
        assert!(!Forraje::default().is_meaningful());
        assert!(!UnidadFamiliar::default().is_meaningful());
    }

    #[test]
    fn test_one_field_makes_section_meaningful() {
        let forraje = Forraje {
            tipo_forraje: "Pasto".to_string(),
            ..Default::default()
        };
        assert!(forraje.is_meaningful());

        let unidad = UnidadFamiliar {
            personas_a_cargo: 3,
            ..Default::default()
        };
        assert!(unidad.is_meaningful());
    }

    #[test]
    fn test_sparse_payload_omits_empty_sections() {
        let payload = AssociatePayload {
            cedula: "8-123-456".to_string(),
            nombre: "Juan".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("forrajes"));
        assert!(!obj.contains_key("finca"));
        assert!(!obj.contains_key("unidadFamiliar"));
        assert!(obj.contains_key("cedula"));
    }

    #[test]
    fn test_payload_keeps_populated_sections() {
        let payload = AssociatePayload {
            forrajes: vec![Forraje {
                tipo_forraje: "Pasto".to_string(),
                variedad: "X".to_string(),
                hectareas: 2.0,
                utilizacion: "Pastoreo".to_string(),
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["forrajes"][0]["tipoForraje"], "Pasto");
        assert_eq!(json["forrajes"][0]["hectareas"], 2.0);
    }
}
