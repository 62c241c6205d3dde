//! Field classes and the outcome of validating one field.

use serde::Serialize;

/// Rule category a field belongs to, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Name,
    Phone,
    Email,
    Date,
    None,
}

impl FieldClass {
    pub fn of(field: &str) -> Self {
        match field {
            "name" => FieldClass::Name,
            "phone" => FieldClass::Phone,
            "email" => FieldClass::Email,
            "date" => FieldClass::Date,
            _ => FieldClass::None,
        }
    }

    pub fn has_rules(&self) -> bool {
        !matches!(self, FieldClass::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
