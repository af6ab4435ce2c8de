//! Favorites: record mapping and gateway port

pub mod ports;

use greenloop_domain::{Favorite, FavoriteRecord};

pub use ports::FavoriteGateway;

use crate::listings::to_listing;

/// Map a favorite row, including its embedded listing when present
pub fn to_favorite(record: &FavoriteRecord) -> Favorite {
    Favorite {
        id: record.id.clone(),
        user_id: record.user_id.clone(),
        listing_id: record.listing_id.clone(),
        created_at: record.created_at,
        listing: record.listing.as_ref().map(to_listing),
    }
}

pub fn to_favorites(records: &[FavoriteRecord]) -> Vec<Favorite> {
    records.iter().map(to_favorite).collect()
}

/// Listing ids in the order the favorites were returned
pub fn favorited_listing_ids(favorites: &[Favorite]) -> Vec<&str> {
    favorites.iter().map(|favorite| favorite.listing_id.as_str()).collect()
}
