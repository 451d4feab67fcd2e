//! Stepper - Multi-Step Form Navigation
//!
//! A fixed sequence of named steps over a flat set of field values. The step
//! index is 1-based and clamped at both ends; forward navigation is gated on
//! the current step's required fields.

use ahash::AHashMap;

use crate::error::{Error, Result};

/// One entered field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free-text input
    Text(String),
    /// Tri-state checkbox; `None` means not answered
    Flag(Option<bool>),
}

impl FieldValue {
    /// Whether the value counts as filled for required-field checks:
    /// non-empty text, or a defined boolean
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Flag(flag) => flag.is_some(),
        }
    }
}

/// Flat set of named field values for one form
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: AHashMap<String, FieldValue>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text field
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    /// Set a boolean field
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.values
            .insert(name.to_string(), FieldValue::Flag(Some(value)));
    }

    /// Trimmed text value, empty string when unset or not text
    pub fn text(&self, name: &str) -> String {
        match self.values.get(name) {
            Some(FieldValue::Text(s)) => s.trim().to_string(),
            _ => String::new(),
        }
    }

    /// Boolean value, `None` when unanswered
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(FieldValue::Flag(flag)) => *flag,
            _ => None,
        }
    }

    /// Required-field check for one name
    pub fn is_filled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(FieldValue::is_filled)
    }
}

/// Definition of one step
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    /// Step name (stable, used in validation errors)
    pub name: &'static str,
    /// Fields that must be filled before leaving this step forward
    pub required: &'static [&'static str],
}

/// Multi-step navigation state
#[derive(Debug, Clone)]
pub struct Stepper {
    steps: Vec<StepDef>,
    current: usize,
}

impl Stepper {
    /// Create a stepper positioned on step 1.
    ///
    /// Panics when `steps` is empty; a form always has at least one step.
    pub fn new(steps: Vec<StepDef>) -> Self {
        assert!(!steps.is_empty(), "a stepper needs at least one step");
        Self { steps, current: 1 }
    }

    /// Current step index (1-based)
    pub fn current(&self) -> usize {
        self.current
    }

    /// Current step definition
    pub fn current_step(&self) -> &StepDef {
        &self.steps[self.current - 1]
    }

    /// Total number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the current step is the last
    pub fn is_last(&self) -> bool {
        self.current == self.steps.len()
    }

    /// Required fields of the current step that are not filled
    pub fn missing_fields(&self, fields: &FormFields) -> Vec<String> {
        self.current_step()
            .required
            .iter()
            .filter(|name| !fields.is_filled(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether the current step's required fields are all filled;
    /// steps without required fields are always valid
    pub fn step_valid(&self, fields: &FormFields) -> bool {
        self.missing_fields(fields).is_empty()
    }

    /// Advance one step, clamped to the last; blocked while the current
    /// step is invalid
    pub fn next(&mut self, fields: &FormFields) -> Result<usize> {
        let missing = self.missing_fields(fields);
        if !missing.is_empty() {
            return Err(Error::Validation {
                step: self.current_step().name.to_string(),
                fields: missing,
            });
        }
        if self.current < self.steps.len() {
            self.current += 1;
        }
        Ok(self.current)
    }

    /// Go back one step, clamped to the first
    pub fn back(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_steps() -> Stepper {
        Stepper::new(vec![
            StepDef {
                name: "datos-personales",
                required: &["cedula", "nombre"],
            },
            StepDef {
                name: "documentos",
                required: &[],
            },
        ])
    }

    #[test]
    fn test_forward_blocked_on_missing_required_field() {
        let mut stepper = two_steps();
        let mut fields = FormFields::new();
        fields.set_text("cedula", "");
        fields.set_text("nombre", "Juan");

        assert!(!stepper.step_valid(&fields));
        match stepper.next(&fields) {
            Err(Error::Validation { step, fields }) => {
                assert_eq!(step, "datos-personales");
                assert_eq!(fields, vec!["cedula".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(stepper.current(), 1);
    }

    #[test]
    fn test_forward_with_valid_fields() {
        let mut stepper = two_steps();
        let mut fields = FormFields::new();
        fields.set_text("cedula", "8-123-456");
        fields.set_text("nombre", "Juan");

        assert_eq!(stepper.next(&fields).expect("advance"), 2);
        assert!(stepper.is_last());
    }

    #[test]
    fn test_next_clamps_to_last_step() {
        let mut stepper = two_steps();
        let mut fields = FormFields::new();
        fields.set_text("cedula", "x");
        fields.set_text("nombre", "y");

        stepper.next(&fields).expect("advance");
        assert_eq!(stepper.next(&fields).expect("clamped"), 2);
    }

    #[test]
    fn test_back_clamps_to_first_step() {
        let mut stepper = two_steps();
        assert_eq!(stepper.back(), 1);
    }

    #[test]
    fn test_step_without_required_fields_is_valid() {
        let mut stepper = two_steps();
        let mut fields = FormFields::new();
        fields.set_text("cedula", "x");
        fields.set_text("nombre", "y");
        stepper.next(&fields).expect("advance");

        assert!(stepper.step_valid(&FormFields::new()));
    }

    #[test]
    #[should_panic(expected = "at least one step")]
    fn test_empty_step_list_is_rejected() {
        let _ = Stepper::new(Vec::new());
    }

    #[test]
    fn test_defined_flag_counts_as_filled() {
        let mut fields = FormFields::new();
        assert!(!fields.is_filled("acepta"));
        fields.set_flag("acepta", false);
        assert!(fields.is_filled("acepta"));
    }
}
