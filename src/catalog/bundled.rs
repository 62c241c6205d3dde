//! Fallback collections compiled into the binary.

use crate::content::ResourceKey;

const SITE: &str = include_str!("../../data/site.json");
const SERVICES: &str = include_str!("../../data/services.json");
const PACKAGES: &str = include_str!("../../data/packages.json");
const BLOG: &str = include_str!("../../data/blog.json");
const GALLERY: &str = include_str!("../../data/gallery.json");
const FAQS: &str = include_str!("../../data/faqs.json");

/// Raw bundled JSON for a known collection.
pub fn fallback_for(key: &ResourceKey) -> Option<&'static str> {
    match key.as_str() {
        ResourceKey::SITE => Some(SITE),
        ResourceKey::SERVICES => Some(SERVICES),
        ResourceKey::PACKAGES => Some(PACKAGES),
        ResourceKey::BLOG => Some(BLOG),
        ResourceKey::GALLERY => Some(GALLERY),
        ResourceKey::FAQS => Some(FAQS),
        _ => None,
    }
}
