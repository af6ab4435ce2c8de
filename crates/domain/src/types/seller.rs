//! Seller profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::utils::serde::string_or_number;

/// Seller row returned by `GET /api/sellers/bio/:uuid`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRecord {
    #[serde(alias = "uuid", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    pub id: String,
    pub username: String,
    pub bio: String,
    pub rating: Option<f32>,
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `PUT /api/sellers/bio/:uuid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BioUpdate {
    pub bio: String,
}
