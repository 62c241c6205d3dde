//! Typed shapes of the bundled JSON collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payment label that marks an item as needing a deposit up front.
pub const DEPOSIT_PAYMENT: &str = "50% deposit";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub hours: OpeningHours,
    #[serde(default)]
    pub policies: Policies,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Social {
    #[serde(default)]
    pub tiktok: String,
    #[serde(default)]
    pub instagram: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekdays: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Policies {
    #[serde(default)]
    pub cancellation: String,
    #[serde(default)]
    pub reschedule: String,
    #[serde(default)]
    pub deposit: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub blurb: String,
    pub duration: String,
    pub price: u64,
    pub payment_type: String,
    pub image: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    pub description: String,
    pub includes: Vec<String>,
    pub price: u64,
    pub image: String,
    pub duration: String,
    pub payment_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    pub excerpt: String,
    #[serde(rename = "contentHTML")]
    pub content_html: String,
    pub image: String,
}

/// Image paths grouped by gallery category.
pub type Gallery = BTreeMap<String, Vec<String>>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Service,
    Package,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Service => "service",
            ItemKind::Package => "package",
        }
    }
}

/// The service or package a booking form is opened for.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub price: u64,
    pub duration: String,
    pub payment_type: String,
}

impl BookingItem {
    pub fn requires_deposit(&self) -> bool {
        self.payment_type == DEPOSIT_PAYMENT
    }

    /// Half the price, rounded down to whole shillings.
    pub fn deposit(&self) -> Option<u64> {
        self.requires_deposit().then_some(self.price / 2)
    }

    /// Hidden fields the booking form carries alongside the user's input.
    pub fn hidden_fields(&self) -> [(&'static str, String); 4] {
        [
            ("service", self.id.clone()),
            ("serviceType", self.kind.as_str().to_string()),
            ("serviceName", self.name.clone()),
            ("servicePrice", self.price.to_string()),
        ]
    }
}

impl From<&Service> for BookingItem {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.clone(),
            name: service.name.clone(),
            kind: ItemKind::Service,
            price: service.price,
            duration: service.duration.clone(),
            payment_type: service.payment_type.clone(),
        }
    }
}

impl From<&Package> for BookingItem {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id.clone(),
            name: package.title.clone(),
            kind: ItemKind::Package,
            price: package.price,
            duration: package.duration.clone(),
            payment_type: package.payment_type.clone(),
        }
    }
}
