//! Favorite endpoints. All of them require sign-in.

use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_core::favorites::{to_favorite, to_favorites};
use greenloop_core::FavoriteGateway;
use greenloop_domain::{Favorite, FavoriteRecord, FavoriteStatus, NewFavorite};
use tracing::{debug, instrument};

use super::client::{segment, ApiClient, AuthMode};

#[derive(Debug, Clone)]
pub struct FavoritesApi {
    client: Arc<ApiClient>,
}

impl FavoritesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FavoriteGateway for FavoritesApi {
    #[instrument(skip(self))]
    async fn fetch_favorites(&self, user_id: &str) -> ApiResult<Vec<Favorite>> {
        let records: Vec<FavoriteRecord> = self
            .client
            .get(
                &format!("/api/favorites/{}", segment(user_id)),
                &[],
                AuthMode::Bearer,
                "Failed to load favorites",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "fetch_favorites failed"))?;
        Ok(to_favorites(&records))
    }

    #[instrument(skip(self))]
    async fn is_favorited(&self, listing_id: &str, user_id: &str) -> ApiResult<bool> {
        let status: FavoriteStatus = self
            .client
            .get(
                &format!("/api/favorites/check/{}/{}", segment(listing_id), segment(user_id)),
                &[],
                AuthMode::Bearer,
                "Failed to check favorite",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "is_favorited failed"))?;
        Ok(status.is_favorited)
    }

    #[instrument(skip(self))]
    async fn add_favorite(&self, user_id: &str, listing_id: &str) -> ApiResult<Favorite> {
        let body = NewFavorite { user_id: user_id.to_string(), listing_id: listing_id.to_string() };
        let record: FavoriteRecord = self
            .client
            .post("/api/favorites", &body, AuthMode::Bearer, "Failed to add favorite")
            .await
            .inspect_err(|err| debug!(error = %err, "add_favorite failed"))?;
        Ok(to_favorite(&record))
    }

    #[instrument(skip(self))]
    async fn remove_favorite(&self, user_id: &str, listing_id: &str) -> ApiResult<()> {
        self.client
            .delete(
                &format!("/api/favorites/{}/{}", segment(listing_id), segment(user_id)),
                AuthMode::Bearer,
                "Failed to remove favorite",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "remove_favorite failed"))
    }
}
