//! Submitted form records.

use crate::catalog::BookingItem;
use crate::forms::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Booking,
    Contact,
}

impl SubmissionKind {
    /// Storage key holding the JSON array of records.
    pub fn storage_key(&self) -> &'static str {
        match self {
            SubmissionKind::Booking => "salon-bookings",
            SubmissionKind::Contact => "salon-contacts",
        }
    }

    pub fn id_prefix(&self) -> &'static str {
        match self {
            SubmissionKind::Booking => "booking",
            SubmissionKind::Contact => "contact",
        }
    }

    /// Pause between storing a record and confirming it.
    pub fn default_delay(&self) -> Duration {
        match self {
            SubmissionKind::Booking => Duration::from_millis(1500),
            SubmissionKind::Contact => Duration::from_millis(2000),
        }
    }
}

/// One stored submission: the form's fields plus an id and a creation time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: FormValues,
}

impl SubmissionRecord {
    pub fn new(kind: SubmissionKind, mut fields: FormValues, now: DateTime<Utc>) -> Self {
        fields.remove("id");
        fields.remove("timestamp");
        Self {
            id: format!("{}-{}", kind.id_prefix(), now.timestamp_millis()),
            timestamp: now,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Add the hidden item fields a booking form carries.
pub fn attach_item(values: &mut FormValues, item: &BookingItem) {
    for (name, value) in item.hidden_fields() {
        values.insert(name.to_string(), value);
    }
}
