//! Port interfaces for listings
//!
//! Implemented by the HTTP gateways in `greenloop-infra`.

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_domain::{ImageFile, Listing, ListingFilter, ListingUpdate, NewListing};

/// Remote listing catalogue
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// Browse listings, optionally filtered
    async fn fetch_listings(&self, filter: &ListingFilter) -> ApiResult<Vec<Listing>>;

    /// A single listing; 404 when it was removed
    async fn fetch_listing(&self, id: &str) -> ApiResult<Listing>;

    /// Everything a seller has listed
    async fn fetch_seller_listings(&self, seller_id: &str) -> ApiResult<Vec<Listing>>;

    /// Publish a new listing (requires sign-in)
    async fn create_listing(&self, listing: &NewListing) -> ApiResult<Listing>;

    /// Post an in-place edit back to the server (requires sign-in)
    async fn update_listing(&self, id: &str, changes: &ListingUpdate) -> ApiResult<Listing>;

    /// Remove a listing (requires sign-in)
    async fn delete_listing(&self, id: &str) -> ApiResult<()>;
}

/// Hosts listing photos
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload one image and return its public URL
    async fn upload_listing_image(&self, image: ImageFile) -> ApiResult<String>;
}
