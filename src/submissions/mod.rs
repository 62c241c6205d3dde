//! Booking and contact submissions: validation, local persistence, notices.

pub mod notifier;
pub mod record;
pub mod store;
pub mod submitter;

pub use notifier::{LogNotifier, Notifier, ToastKind, DEFAULT_TOAST_DURATION};
pub use record::{attach_item, SubmissionKind, SubmissionRecord};
pub use store::SubmissionStore;
pub use submitter::FormSubmitter;

use crate::content::StorageError;
use crate::forms::FormReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Stored records are corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Form has {} invalid field(s)", .0.errors.len())]
    Invalid(FormReport),
    #[error("A submission is already in progress")]
    InFlight,
    #[error("Could not store submission: {0}")]
    Record(#[from] RecordError),
}

pub type SubmitResult<T> = Result<T, SubmitError>;

#[cfg(test)]
mod tests;
