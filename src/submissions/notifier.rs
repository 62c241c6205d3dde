//! User-facing notices raised by the submission flow.

use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Warning => write!(f, "warning"),
        }
    }
}

/// Presentation seam: toasts and the booking modal.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: ToastKind, duration: Duration);

    fn show_modal(&self) {}

    fn hide_modal(&self) {}
}

/// Sends notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, kind: ToastKind, duration: Duration) {
        let duration_ms = duration.as_millis() as u64;
        match kind {
            ToastKind::Success => info!(duration_ms, "{message}"),
            ToastKind::Warning => warn!(duration_ms, "{message}"),
            ToastKind::Error => error!(duration_ms, "{message}"),
        }
    }
}
