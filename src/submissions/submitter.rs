//! Validate, store and confirm one form's submissions.

use super::notifier::{Notifier, ToastKind, DEFAULT_TOAST_DURATION};
use super::record::{SubmissionKind, SubmissionRecord};
use super::store::SubmissionStore;
use super::{SubmitError, SubmitResult};
use crate::clock::Clock;
use crate::forms::{FieldValidator, FormSchema, FormValues};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

const MSG_FIX_ERRORS: &str = "Please correct the errors above";
const BOOKING_SUCCESS_DURATION: Duration = Duration::from_millis(7000);

/// Submission flow for a single form instance.
///
/// Only one submission runs at a time per instance; overlapping calls are
/// turned away the way a disabled submit button would turn away clicks.
pub struct FormSubmitter {
    kind: SubmissionKind,
    schema: FormSchema,
    validator: Arc<FieldValidator>,
    store: SubmissionStore,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    delay: Duration,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the submission ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSubmitter {
    pub fn new(
        kind: SubmissionKind,
        validator: Arc<FieldValidator>,
        store: SubmissionStore,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let schema = match kind {
            SubmissionKind::Booking => FormSchema::booking(),
            SubmissionKind::Contact => FormSchema::contact(),
        };
        Self {
            kind,
            schema,
            validator,
            store,
            notifier,
            clock,
            delay: kind.default_delay(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_schema(mut self, schema: FormSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[instrument(skip(self, values), fields(kind = self.kind.id_prefix()))]
    pub async fn submit(&self, values: FormValues) -> SubmitResult<SubmissionRecord> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Err(SubmitError::InFlight);
        };

        let report = self.validator.validate_form(&self.schema, &values);
        if !report.is_valid() {
            self.notifier
                .notify(MSG_FIX_ERRORS, ToastKind::Error, DEFAULT_TOAST_DURATION);
            return Err(SubmitError::Invalid(report));
        }

        let record = SubmissionRecord::new(self.kind, values, self.clock.now());
        if let Err(e) = self.store.append(&record) {
            error!(error = %e, "Submission could not be stored");
            self.notifier
                .notify(self.failure_message(), ToastKind::Error, DEFAULT_TOAST_DURATION);
            return Err(SubmitError::Record(e));
        }

        tokio::time::sleep(self.delay).await;

        match self.kind {
            SubmissionKind::Booking => {
                self.notifier.hide_modal();
                let message = format!(
                    "Booking submitted successfully! We'll call you at {} to confirm your appointment.",
                    record.field("phone").unwrap_or_default()
                );
                self.notifier
                    .notify(&message, ToastKind::Success, BOOKING_SUCCESS_DURATION);
            }
            SubmissionKind::Contact => {
                self.notifier.notify(
                    "Message sent successfully! We'll get back to you soon.",
                    ToastKind::Success,
                    DEFAULT_TOAST_DURATION,
                );
            }
        }

        info!(id = %record.id, "Submission accepted");
        Ok(record)
    }

    fn failure_message(&self) -> &'static str {
        match self.kind {
            SubmissionKind::Booking => {
                "Error submitting booking. Please try again or call us directly."
            }
            SubmissionKind::Contact => "Error sending message. Please try again or call us directly.",
        }
    }
}
