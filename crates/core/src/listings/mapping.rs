//! Server listing rows to view models
//!
//! Mapping borrows the record and never mutates it, so mapping the same
//! record twice yields equal listings.

use greenloop_domain::constants::{MAX_ECO_SCORE, UNKNOWN_SELLER_NAME};
use greenloop_domain::{Listing, ListingRecord, SellerSummary};

/// Map one listing row
pub fn to_listing(record: &ListingRecord) -> Listing {
    Listing {
        id: record.id.clone(),
        title: record.title.trim().to_string(),
        description: text_or_empty(record.description.as_deref()),
        category: text_or_empty(record.category.as_deref()),
        condition: text_or_empty(record.condition.as_deref()),
        location: text_or_empty(record.location.as_deref()),
        price: record.price,
        negotiable: record.is_negotiable.unwrap_or(false),
        eco_score: record.eco_score.map(clamp_eco_score),
        eco_attributes: record.eco_attributes.clone(),
        image_urls: image_urls(record),
        created_at: record.created_at,
        seller: to_seller_summary(record),
    }
}

pub fn to_listings(records: &[ListingRecord]) -> Vec<Listing> {
    records.iter().map(to_listing).collect()
}

/// Seller columns joined into a listing row
pub fn to_seller_summary(record: &ListingRecord) -> SellerSummary {
    SellerSummary {
        id: record.seller_id.clone(),
        created_at: record.seller_created_at,
        username: record
            .seller_username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SELLER_NAME)
            .to_string(),
        bio: text_or_empty(record.seller_bio.as_deref()),
        rating: record.seller_rating,
        verified: record.seller_verified.unwrap_or(false),
    }
}

/// `image_urls` when the row has a non-empty array, else the single `image_url`
fn image_urls(record: &ListingRecord) -> Vec<String> {
    let from_list: Vec<String> = record
        .image_urls
        .iter()
        .flatten()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if !from_list.is_empty() {
        return from_list;
    }

    record
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| vec![url.to_string()])
        .unwrap_or_default()
}

fn clamp_eco_score(score: u32) -> u8 {
    u8::try_from(score.min(u32::from(MAX_ECO_SCORE))).unwrap_or(MAX_ECO_SCORE)
}

fn text_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
