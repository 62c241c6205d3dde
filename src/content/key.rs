//! Logical content collection names and the keys derived from them.

use std::fmt;

/// Prefix under which local overrides are stored.
const OVERRIDE_PREFIX: &str = "admin-";

/// Directory (relative to the site root) holding the bundled JSON files.
const DATA_DIR: &str = "data";

/// Identifies one JSON collection such as `services` or `site`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub const SITE: &'static str = "site";
    pub const SERVICES: &'static str = "services";
    pub const PACKAGES: &'static str = "packages";
    pub const BLOG: &'static str = "blog";
    pub const GALLERY: &'static str = "gallery";
    pub const FAQS: &'static str = "faqs";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn site() -> Self {
        Self::new(Self::SITE)
    }

    pub fn services() -> Self {
        Self::new(Self::SERVICES)
    }

    pub fn packages() -> Self {
        Self::new(Self::PACKAGES)
    }

    pub fn blog() -> Self {
        Self::new(Self::BLOG)
    }

    pub fn gallery() -> Self {
        Self::new(Self::GALLERY)
    }

    pub fn faqs() -> Self {
        Self::new(Self::FAQS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key checked for a local override, e.g. `admin-services`.
    pub fn override_key(&self) -> String {
        format!("{OVERRIDE_PREFIX}{}", self.0)
    }

    /// Path of the remote resource relative to the site root, e.g. `data/services.json`.
    pub fn locator(&self) -> String {
        format!("{DATA_DIR}/{}.json", self.0)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
