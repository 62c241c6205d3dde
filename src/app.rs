//! Wires configuration into the content, form and submission components.

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::content::{ContentCache, FileStorage, HttpFetcher, Storage};
use crate::forms::FieldValidator;
use crate::submissions::{FormSubmitter, Notifier, SubmissionKind, SubmissionStore};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct Salon {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<ContentCache>,
    pub catalog: Catalog,
    pub validator: Arc<FieldValidator>,
    pub clock: Arc<dyn Clock>,
}

impl Salon {
    pub fn from_config(config: Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(
            FileStorage::open(&config.storage_path).context("Failed to open local storage")?,
        );
        let fetcher = HttpFetcher::new(
            &config.base_url,
            config.request_timeout(),
            &config.user_agent,
        )
        .context("Failed to build HTTP client")?;

        Self::assemble(config, storage, Arc::new(fetcher), Arc::new(SystemClock))
    }

    /// Build from explicit parts; used when the fetcher or clock is substituted.
    pub fn assemble(
        config: Config,
        storage: Arc<dyn Storage>,
        fetcher: Arc<dyn crate::content::Fetcher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let closed_on = config.closed_weekday()?;
        let cache = Arc::new(ContentCache::new(fetcher, storage.clone()));
        let catalog = Catalog::new(cache.clone());
        let validator = Arc::new(FieldValidator::new(clock.clone()).with_closed_day(closed_on));

        Ok(Self {
            config,
            storage,
            cache,
            catalog,
            validator,
            clock,
        })
    }

    pub fn store(&self, kind: SubmissionKind) -> SubmissionStore {
        SubmissionStore::new(self.storage.clone(), kind)
    }

    pub fn submitter(&self, kind: SubmissionKind, notifier: Arc<dyn Notifier>) -> FormSubmitter {
        let submitter = FormSubmitter::new(
            kind,
            self.validator.clone(),
            self.store(kind),
            notifier,
            self.clock.clone(),
        );
        match self.config.submit_delay() {
            Some(delay) => submitter.with_delay(delay),
            None => submitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::content::{HttpFetcher, ResourceKey};
    use crate::submissions::LogNotifier;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[tokio::test]
    async fn site_flow_against_http_and_disk() {
        let mut server = mockito::Server::new_async().await;
        let services = server
            .mock("GET", "/data/services.json")
            .with_status(200)
            .with_body(
                r#"[{"id":"braids","name":"Braids","blurb":"Box braids.","duration":"180 min",
                    "price":3500,"paymentType":"50% deposit","image":"b.jpg","category":"Hairdressing"}]"#,
            )
            .expect(1)
            .create_async()
            .await;
        let _faqs = server
            .mock("GET", "/data/faqs.json")
            .with_status(500)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            base_url: server.url(),
            storage_path: dir.path().join("storage.json"),
            submit_delay_ms: Some(0),
            ..Config::default()
        };
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.storage_path).unwrap());
        let fetcher =
            HttpFetcher::new(&config.base_url, Duration::from_secs(5), "salon-test").unwrap();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        let salon =
            Salon::assemble(config, storage, Arc::new(fetcher), Arc::new(clock)).unwrap();

        // Remote collection, fetched once.
        assert_eq!(salon.catalog.services().await.unwrap()[0].id, "braids");
        assert_eq!(salon.catalog.services().await.unwrap().len(), 1);
        services.assert_async().await;

        // Server error falls back to the bundled FAQs.
        assert_eq!(salon.catalog.faqs().await.unwrap().len(), 6);

        // Override beats the cached remote copy.
        salon
            .cache
            .set_override(&ResourceKey::services(), &serde_json::json!([]))
            .unwrap();
        assert!(salon.catalog.services().await.unwrap().is_empty());

        let mut values = crate::forms::FormValues::new();
        for (k, v) in [
            ("name", "Mary Kioko"),
            ("phone", "0712345678"),
            ("date", "2026-10-16"),
            ("time", "09:00"),
            ("terms", "on"),
        ] {
            values.insert(k.to_string(), v.to_string());
        }
        let record = salon
            .submitter(SubmissionKind::Booking, Arc::new(LogNotifier))
            .submit(values)
            .await
            .unwrap();

        let reopened = FileStorage::open(dir.path().join("storage.json")).unwrap();
        let stored = SubmissionStore::new(Arc::new(reopened), SubmissionKind::Booking)
            .list()
            .unwrap();
        assert_eq!(stored, vec![record]);
    }
}
