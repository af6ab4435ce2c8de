//! Port interface for seller profiles

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_domain::SellerProfile;

#[async_trait]
pub trait SellerGateway: Send + Sync {
    /// Public profile; 404 when the seller no longer exists
    async fn fetch_seller_bio(&self, seller_uuid: &str) -> ApiResult<SellerProfile>;

    /// Replace the seller's bio (requires sign-in)
    async fn update_seller_bio(&self, seller_uuid: &str, bio: &str) -> ApiResult<SellerProfile>;
}
