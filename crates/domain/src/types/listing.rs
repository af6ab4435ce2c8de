//! Listing records and view models
//!
//! [`ListingRecord`] mirrors the server's flat JSON row (seller columns are
//! joined in as `seller_*`); [`Listing`] is the nested shape the client
//! renders. The mapping between the two lives in `greenloop-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::impl_string_enum_conversions;
use crate::utils::serde::{string_list, string_or_number};

/// Listing row as returned by the marketplace API
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Numeric columns may be serialized as strings (`"12.50"`)
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub price: f64,
    #[serde(default)]
    pub is_negotiable: Option<bool>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub eco_score: Option<u32>,
    #[serde(default, deserialize_with = "string_list")]
    pub eco_attributes: Vec<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "string_or_number")]
    pub seller_id: String,
    #[serde(default)]
    pub seller_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seller_username: Option<String>,
    #[serde(default)]
    pub seller_bio: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub seller_rating: Option<f32>,
    #[serde(default)]
    pub seller_verified: Option<bool>,
}

/// Seller identity embedded in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerSummary {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub username: String,
    pub bio: String,
    pub rating: Option<f32>,
    pub verified: bool,
}

/// Listing view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub location: String,
    pub price: f64,
    pub negotiable: bool,
    /// 0-100, higher is greener
    pub eco_score: Option<u8>,
    pub eco_attributes: Vec<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub seller: SellerSummary,
}

impl Listing {
    /// The cover image, if any
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Payload for `POST /api/listings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub location: String,
    pub price: f64,
    pub is_negotiable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_score: Option<u8>,
    pub eco_attributes: Vec<String>,
    pub image_urls: Vec<String>,
    pub seller_id: String,
}

/// Partial update posted back after an in-place edit
///
/// Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

impl ListingUpdate {
    /// `true` when no field would be sent
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Server-side ordering for listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    EcoScore,
}

impl_string_enum_conversions!(ListingSort {
    Newest => "newest",
    PriceAsc => "price_asc",
    PriceDesc => "price_desc",
    EcoScore => "eco_score",
});

/// Query parameters for `GET /listings`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<ListingSort>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListingFilter {
    /// Key/value pairs for the query string, skipping unset and blank values
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}
