use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::profile::SequenceHardwareProfile;
use crate::core::types::SequenceId;

/// A purchasable light sequence listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    /// Unique identifier
    pub id: SequenceId,

    /// Listing title
    pub title: String,

    /// Seller display name
    #[serde(default)]
    pub seller: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form category (e.g. "christmas", "halloween")
    pub category: String,

    /// Price in cents; 0 means free
    pub price_cents: u64,

    /// Average buyer rating, 0.0 to 5.0
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub download_count: u64,

    pub created_at: DateTime<Utc>,

    /// Supported hardware configurations
    #[serde(default)]
    pub profiles: Vec<SequenceHardwareProfile>,
}

impl Sequence {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SequenceId::new(id),
            title: title.into(),
            seller: String::new(),
            description: None,
            category: category.into(),
            price_cents: 0,
            rating: 0.0,
            download_count: 0,
            created_at,
            profiles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_price(mut self, price_cents: u64) -> Self {
        self.price_cents = price_cents;
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_downloads(mut self, download_count: u64) -> Self {
        self.download_count = download_count;
        self
    }

    #[must_use]
    pub fn with_profiles(mut self, profiles: Vec<SequenceHardwareProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Case-insensitive category comparison
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }
}
