//! Booking and contact form validation.

pub mod field;
pub mod schema;
pub mod validator;

pub use field::{FieldClass, Validation};
pub use schema::{FieldError, FieldSpec, FormReport, FormSchema, FormValues};
pub use validator::{closed_message, FieldValidator};
