//! Favorites

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::listing::{Listing, ListingRecord};
use crate::utils::serde::string_or_number;

/// Favorite row; the server may embed the favorited listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub listing: Option<ListingRecord>,
}

/// Favorite view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
    pub listing: Option<Listing>,
}

/// Answer of the favorite check endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatus {
    #[serde(alias = "isFavorited")]
    pub is_favorited: bool,
}

/// Payload for `POST /api/favorites`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFavorite {
    pub user_id: String,
    pub listing_id: String,
}
