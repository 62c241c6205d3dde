//! # Spike Salon site core
//!
//! Data layer behind the salon's marketing pages:
//!
//! ```text
//! ResourceKey → ContentCache (override → cache → fetch → fallback) → Catalog
//! form values → FieldValidator → FormSubmitter → SubmissionStore
//! ```
//!
//! Everything with side effects (network, local storage, time, user notices)
//! is injected, so each piece runs against fakes in tests.

pub mod app;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod content;
pub mod forms;
pub mod submissions;

pub use app::Salon;
pub use catalog::Catalog;
pub use config::Config;
pub use content::{ContentCache, ResourceKey};
pub use forms::{FieldValidator, FormSchema, Validation};
pub use submissions::{FormSubmitter, SubmissionKind};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global log subscriber; `RUST_LOG` refines the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
