//! Port interface for favorites

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_domain::Favorite;

/// A user's saved listings. Every call requires sign-in.
#[async_trait]
pub trait FavoriteGateway: Send + Sync {
    async fn fetch_favorites(&self, user_id: &str) -> ApiResult<Vec<Favorite>>;

    async fn is_favorited(&self, listing_id: &str, user_id: &str) -> ApiResult<bool>;

    async fn add_favorite(&self, user_id: &str, listing_id: &str) -> ApiResult<Favorite>;

    async fn remove_favorite(&self, user_id: &str, listing_id: &str) -> ApiResult<()>;
}
