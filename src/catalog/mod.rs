//! Typed access to the site's content collections.
//! Every accessor resolves through the shared [`ContentCache`] with the
//! bundled collection as fallback.

pub mod bundled;
pub mod format;
pub mod models;

pub use format::{format_date, format_date_str, format_price};
pub use models::{
    BlogPost, BookingItem, Faq, Gallery, ItemKind, Package, Service, SiteInfo, DEPOSIT_PAYMENT,
};

use crate::content::{ContentCache, ContentError, ResourceKey};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Number of posts `recent_blog_posts` returns when asked for the default.
pub const DEFAULT_RECENT_POSTS: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Content unavailable: {0}")]
    Content(#[from] ContentError),
    #[error("Collection {key} has an unexpected shape: {reason}")]
    Shape { key: String, reason: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone)]
pub struct Catalog {
    cache: Arc<ContentCache>,
}

impl Catalog {
    pub fn new(cache: Arc<ContentCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    async fn load<T: DeserializeOwned>(&self, key: ResourceKey) -> CatalogResult<T> {
        let fallback = match bundled::fallback_for(&key) {
            Some(raw) => Some(serde_json::from_str::<Value>(raw).map_err(|e| {
                CatalogError::Shape {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        let value = self.cache.resolve(&key, fallback).await?;
        serde_json::from_value(value).map_err(|e| CatalogError::Shape {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn site(&self) -> CatalogResult<SiteInfo> {
        self.load(ResourceKey::site()).await
    }

    pub async fn services(&self) -> CatalogResult<Vec<Service>> {
        self.load(ResourceKey::services()).await
    }

    pub async fn packages(&self) -> CatalogResult<Vec<Package>> {
        self.load(ResourceKey::packages()).await
    }

    pub async fn blog_posts(&self) -> CatalogResult<Vec<BlogPost>> {
        self.load(ResourceKey::blog()).await
    }

    pub async fn gallery(&self) -> CatalogResult<Gallery> {
        self.load(ResourceKey::gallery()).await
    }

    pub async fn faqs(&self) -> CatalogResult<Vec<Faq>> {
        self.load(ResourceKey::faqs()).await
    }

    pub async fn blog_post(&self, slug: &str) -> CatalogResult<Option<BlogPost>> {
        let posts = self.blog_posts().await?;
        Ok(posts.into_iter().find(|post| post.slug == slug))
    }

    pub async fn service(&self, id: &str) -> CatalogResult<Option<Service>> {
        let services = self.services().await?;
        Ok(services.into_iter().find(|service| service.id == id))
    }

    pub async fn package(&self, id: &str) -> CatalogResult<Option<Package>> {
        let packages = self.packages().await?;
        Ok(packages.into_iter().find(|package| package.id == id))
    }

    /// Look up a bookable item by id, services first.
    pub async fn booking_item(&self, id: &str) -> CatalogResult<Option<BookingItem>> {
        if let Some(service) = self.service(id).await? {
            return Ok(Some(BookingItem::from(&service)));
        }
        Ok(self.package(id).await?.as_ref().map(BookingItem::from))
    }

    pub async fn services_by_category(&self, category: &str) -> CatalogResult<Vec<Service>> {
        let services = self.services().await?;
        Ok(services
            .into_iter()
            .filter(|service| service.category == category)
            .collect())
    }

    /// Distinct categories in first-seen order.
    pub async fn service_categories(&self) -> CatalogResult<Vec<String>> {
        let services = self.services().await?;
        let mut categories: Vec<String> = Vec::new();
        for service in services {
            if !categories.contains(&service.category) {
                categories.push(service.category);
            }
        }
        Ok(categories)
    }

    /// Case-insensitive match on name, blurb or category.
    pub async fn search_services(&self, query: &str) -> CatalogResult<Vec<Service>> {
        let needle = query.to_lowercase();
        let services = self.services().await?;
        Ok(services
            .into_iter()
            .filter(|service| {
                service.name.to_lowercase().contains(&needle)
                    || service.blurb.to_lowercase().contains(&needle)
                    || service.category.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub async fn blog_posts_by_tag(&self, tag: &str) -> CatalogResult<Vec<BlogPost>> {
        let posts = self.blog_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect())
    }

    /// Newest posts first, at most `limit` of them.
    pub async fn recent_blog_posts(&self, limit: usize) -> CatalogResult<Vec<BlogPost>> {
        let mut posts = self.blog_posts().await?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts.truncate(limit);
        Ok(posts)
    }

    /// Warm the cache for the collections every page needs.
    /// Failures are logged; returns how many collections loaded.
    #[instrument(skip(self))]
    pub async fn prefetch(&self) -> usize {
        let (site, services, packages, blog, faqs) = futures::join!(
            self.site(),
            self.services(),
            self.packages(),
            self.blog_posts(),
            self.faqs(),
        );

        let outcomes = [
            (ResourceKey::SITE, site.err()),
            (ResourceKey::SERVICES, services.err()),
            (ResourceKey::PACKAGES, packages.err()),
            (ResourceKey::BLOG, blog.err()),
            (ResourceKey::FAQS, faqs.err()),
        ];

        let mut loaded = 0;
        for (key, error) in outcomes {
            match error {
                None => loaded += 1,
                Some(e) => warn!(key, error = %e, "Some data failed to prefetch"),
            }
        }
        info!(loaded, "Prefetch complete");
        loaded
    }
}
