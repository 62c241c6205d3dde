//! Per-field validation rules for the booking and contact forms.

use super::field::{FieldClass, Validation};
use crate::clock::Clock;
use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_NAME_SHORT: &str = "Name must be at least 2 characters long";
pub const MSG_NAME_CHARS: &str = "Name can only contain letters and spaces";
pub const MSG_PHONE: &str = "Please enter a valid Kenyan phone number (e.g., +254712345678)";
pub const MSG_EMAIL: &str = "Please enter a valid email address";
pub const MSG_DATE_FORMAT: &str = "Please enter a valid date";
pub const MSG_DATE_PAST: &str = "Please select a future date";

const MIN_NAME_LEN: usize = 2;

// Optional +254 / 254 / 0 prefix, then 7 or 1, then eight digits.
static KENYAN_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+254|254|0)?[71][0-9]{8}$").expect("phone pattern compiles"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

pub struct FieldValidator {
    clock: Arc<dyn Clock>,
    closed_on: Weekday,
}

impl FieldValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            closed_on: Weekday::Sun,
        }
    }

    pub fn with_closed_day(mut self, day: Weekday) -> Self {
        self.closed_on = day;
        self
    }

    pub fn closed_on(&self) -> Weekday {
        self.closed_on
    }

    /// Validate one field. The first failing rule decides the message.
    pub fn validate(&self, field: &str, raw: &str, required: bool) -> Validation {
        let value = raw.trim();

        if required && value.is_empty() {
            return Validation::fail(MSG_REQUIRED);
        }
        if value.is_empty() {
            return Validation::ok();
        }

        let outcome = match FieldClass::of(field) {
            FieldClass::Name => check_name(value),
            FieldClass::Phone => check_phone(value),
            FieldClass::Email => check_email(value),
            FieldClass::Date => self.check_date(value),
            FieldClass::None => Validation::ok(),
        };

        if !outcome.valid {
            debug!(field, message = %outcome.message, "Field rejected");
        }
        outcome
    }

    fn check_date(&self, value: &str) -> Validation {
        let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
            return Validation::fail(MSG_DATE_FORMAT);
        };

        // The closed-day message takes precedence over the past-date one.
        if date.weekday() == self.closed_on {
            return Validation::fail(closed_message(self.closed_on));
        }
        if date < self.clock.today() {
            return Validation::fail(MSG_DATE_PAST);
        }
        Validation::ok()
    }
}

fn check_name(value: &str) -> Validation {
    if value.chars().count() < MIN_NAME_LEN {
        Validation::fail(MSG_NAME_SHORT)
    } else if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        Validation::fail(MSG_NAME_CHARS)
    } else {
        Validation::ok()
    }
}

fn check_phone(value: &str) -> Validation {
    let compact = WHITESPACE.replace_all(value, "");
    if KENYAN_PHONE.is_match(&compact) {
        Validation::ok()
    } else {
        Validation::fail(MSG_PHONE)
    }
}

fn check_email(value: &str) -> Validation {
    if EMAIL.is_match(value) {
        Validation::ok()
    } else {
        Validation::fail(MSG_EMAIL)
    }
}

/// "We are closed on Sundays. Please select another date"
pub fn closed_message(day: Weekday) -> String {
    format!(
        "We are closed on {}s. Please select another date",
        weekday_name(day)
    )
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
