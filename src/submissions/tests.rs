use super::*;
use crate::catalog::{BookingItem, ItemKind};
use crate::clock::FixedClock;
use crate::content::{MemoryStorage, Storage, StorageError};
use crate::forms::{FieldValidator, FormValues};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<(String, ToastKind, Duration)>>,
    modal_hidden: Mutex<usize>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<(String, ToastKind, Duration)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: ToastKind, duration: Duration) {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), kind, duration));
    }

    fn hide_modal(&self) {
        *self.modal_hidden.lock().unwrap() += 1;
    }
}

/// Reads succeed, writes fail.
struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "quota exceeded",
        )))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn clock() -> Arc<FixedClock> {
    let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    Arc::new(FixedClock::on(date))
}

fn submitter(
    kind: SubmissionKind,
    storage: Arc<dyn Storage>,
    notifier: Arc<RecordingNotifier>,
) -> FormSubmitter {
    let clock = clock();
    let validator = Arc::new(FieldValidator::new(clock.clone()));
    let store = SubmissionStore::new(storage, kind);
    FormSubmitter::new(kind, validator, store, notifier, clock).with_delay(Duration::ZERO)
}

fn booking_values() -> FormValues {
    [
        ("name", "Mary Kioko"),
        ("phone", "+254712345678"),
        ("email", "mary@example.com"),
        ("date", "2026-10-20"),
        ("time", "10:30"),
        ("notes", ""),
        ("terms", "on"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn record_serializes_flat() {
    let now = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
    let mut fields = FormValues::new();
    fields.insert("name".into(), "Mary".into());
    fields.insert("id".into(), "spoofed".into());

    let record = SubmissionRecord::new(SubmissionKind::Booking, fields, now);
    assert_eq!(record.id, format!("booking-{}", now.timestamp_millis()));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["name"], "Mary");
    assert_eq!(json["id"], record.id);
    assert!(json["timestamp"].as_str().unwrap().starts_with("2026-10-14T09:30:00"));

    let back: SubmissionRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn store_appends_and_clears() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SubmissionStore::new(storage.clone(), SubmissionKind::Contact);
    let now = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();

    let first = SubmissionRecord::new(SubmissionKind::Contact, FormValues::new(), now);
    let second = SubmissionRecord::new(
        SubmissionKind::Contact,
        FormValues::new(),
        now + chrono::Duration::seconds(1),
    );
    assert_ok!(store.append(&first));
    assert_ok!(store.append(&second));

    let listed = store.list().unwrap();
    assert_eq!(listed, vec![first, second]);
    assert!(storage.get_item("salon-contacts").unwrap().is_some());
    assert!(storage.get_item("salon-bookings").unwrap().is_none());

    assert_ok!(store.clear());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn corrupt_collection_is_reported() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("salon-bookings", "{").unwrap();
    let store = SubmissionStore::new(storage, SubmissionKind::Booking);

    assert!(matches!(assert_err!(store.list()), RecordError::Corrupt(_)));
}

#[test]
fn booking_item_fields_are_attached() {
    let item = BookingItem {
        id: "pedicure".into(),
        name: "Pedicure".into(),
        kind: ItemKind::Service,
        price: 2000,
        duration: "60 min".into(),
        payment_type: "50% deposit".into(),
    };
    let mut values = booking_values();
    attach_item(&mut values, &item);

    assert_eq!(values["service"], "pedicure");
    assert_eq!(values["serviceType"], "service");
    assert_eq!(values["serviceName"], "Pedicure");
    assert_eq!(values["servicePrice"], "2000");
}

#[tokio::test]
async fn valid_booking_is_stored_and_confirmed() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = submitter(SubmissionKind::Booking, storage.clone(), notifier.clone());

    let record = form.submit(booking_values()).await.unwrap();
    assert!(record.id.starts_with("booking-"));
    assert_eq!(record.field("phone"), Some("+254712345678"));

    let stored = SubmissionStore::new(storage, SubmissionKind::Booking).list().unwrap();
    assert_eq!(stored, vec![record]);

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].1, ToastKind::Success);
    assert!(notices[0].0.contains("We'll call you at +254712345678"));
    assert_eq!(notices[0].2, Duration::from_millis(7000));
    assert_eq!(*notifier.modal_hidden.lock().unwrap(), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn invalid_form_is_not_stored() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = submitter(SubmissionKind::Booking, storage.clone(), notifier.clone());

    let mut values = booking_values();
    values.insert("phone".into(), "12345".into());
    values.remove("terms");

    match form.submit(values).await {
        Err(SubmitError::Invalid(report)) => {
            assert_eq!(report.errors.len(), 2);
            assert!(report.error_for("phone").is_some());
            assert!(report.error_for("terms").is_some());
        }
        other => panic!("expected invalid form, got {other:?}"),
    }

    assert!(storage.get_item("salon-bookings").unwrap().is_none());
    assert_eq!(notifier.notices()[0].0, "Please correct the errors above");
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn storage_failure_is_reported_and_form_stays_usable() {
    let notifier = Arc::new(RecordingNotifier::default());
    let form = submitter(SubmissionKind::Contact, Arc::new(ReadOnlyStorage), notifier.clone());

    let values: FormValues = [("name", "John Mutua"), ("email", "john@example.com"), ("message", "Hi")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let err = form.submit(values.clone()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Record(RecordError::Storage(_))));
    assert_eq!(notifier.notices()[0].1, ToastKind::Error);
    assert!(notifier.notices()[0].0.contains("Please try again"));

    // Guard released: a retry runs the whole flow again.
    assert!(!form.is_submitting());
    assert!(form.submit(values).await.is_err());
    assert_eq!(notifier.notices().len(), 2);
}

#[tokio::test]
async fn overlapping_submit_is_turned_away() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = submitter(SubmissionKind::Booking, storage.clone(), notifier)
        .with_delay(Duration::from_millis(50));

    let (first, second) = tokio::join!(form.submit(booking_values()), form.submit(booking_values()));

    assert!(first.is_ok());
    assert!(matches!(second, Err(SubmitError::InFlight)));
    let stored = SubmissionStore::new(storage, SubmissionKind::Booking).list().unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn contact_confirmation() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = submitter(SubmissionKind::Contact, storage, notifier.clone());

    let values: FormValues = [("name", "John Mutua"), ("email", "john@example.com"), ("message", "Hi")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let record = form.submit(values).await.unwrap();
    assert!(record.id.starts_with("contact-"));
    assert_eq!(
        notifier.notices()[0].0,
        "Message sent successfully! We'll get back to you soon."
    );
    assert_eq!(*notifier.modal_hidden.lock().unwrap(), 0);
}
