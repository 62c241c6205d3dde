//! Form layouts and whole-form validation.

use super::field::{FieldClass, Validation};
use super::validator::FieldValidator;
use serde::Serialize;
use std::collections::BTreeMap;

/// Submitted form data: field name to raw value.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }

    /// Whether form-level validation looks at this field at all.
    pub fn is_checked(&self) -> bool {
        self.required || FieldClass::of(self.name).has_rules()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Booking modal: contact details, slot, notes and the terms checkbox.
    pub fn booking() -> Self {
        Self::new(vec![
            FieldSpec::required("name"),
            FieldSpec::required("phone"),
            FieldSpec::optional("email"),
            FieldSpec::required("date"),
            FieldSpec::required("time"),
            FieldSpec::optional("notes"),
            FieldSpec::required("terms"),
        ])
    }

    pub fn contact() -> Self {
        Self::new(vec![
            FieldSpec::required("name"),
            FieldSpec::required("email"),
            FieldSpec::optional("phone"),
            FieldSpec::required("message"),
        ])
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.field(name).is_some_and(|spec| spec.required)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub errors: Vec<FieldError>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl FieldValidator {
    /// Validate every checked field of `schema`; all failures are reported.
    pub fn validate_form(&self, schema: &FormSchema, values: &FormValues) -> FormReport {
        let errors = schema
            .fields
            .iter()
            .filter(|spec| spec.is_checked())
            .filter_map(|spec| {
                let raw = values.get(spec.name).map(String::as_str).unwrap_or("");
                let Validation { valid, message } = self.validate(spec.name, raw, spec.required);
                (!valid).then(|| FieldError {
                    field: spec.name.to_string(),
                    message,
                })
            })
            .collect();

        FormReport { errors }
    }
}
