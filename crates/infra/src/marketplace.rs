//! One-stop wiring of every gateway from a [`Config`]

use std::sync::Arc;

use greenloop_common::{ApiError, ApiResult, RetryNotifier};
use greenloop_core::{ChatService, TokenStore};
use greenloop_domain::Config;
use tracing::info;

use crate::api::{
    ApiClient, ApiClientConfig, ChatApi, FavoritesApi, FileTokenStore, ListingsApi,
    MemoryTokenStore, SellersApi, TokenStoreAuth, UploadsApi,
};

/// All marketplace gateways sharing one [`ApiClient`]
#[derive(Clone)]
pub struct Marketplace {
    pub auth: TokenStoreAuth,
    pub listings: Arc<ListingsApi>,
    pub favorites: Arc<FavoritesApi>,
    pub sellers: Arc<SellersApi>,
    pub uploads: Arc<UploadsApi>,
    pub chat: Arc<ChatApi>,
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace")
            .field("listings", &self.listings)
            .field("favorites", &self.favorites)
            .field("sellers", &self.sellers)
            .field("uploads", &self.uploads)
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}

impl Marketplace {
    /// Build the gateways from configuration
    ///
    /// The token lives in `auth.token_path` when configured, in memory
    /// otherwise.
    ///
    /// # Errors
    /// `Config` when the configuration is invalid.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::build(config, None)
    }

    /// Same as [`Marketplace::from_config`], routing retry events to `notifier`
    pub fn with_notifier(config: &Config, notifier: Arc<dyn RetryNotifier>) -> ApiResult<Self> {
        Self::build(config, Some(notifier))
    }

    fn build(config: &Config, notifier: Option<Arc<dyn RetryNotifier>>) -> ApiResult<Self> {
        let store: Arc<dyn TokenStore> = match &config.auth.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        let auth = TokenStoreAuth::new(store);

        let mut builder = ApiClient::builder()
            .config(ApiClientConfig::try_from(config)?)
            .auth(Arc::new(auth.clone()));
        if let Some(notifier) = notifier {
            builder = builder.notifier(notifier);
        }
        let client = Arc::new(builder.build()?);

        info!(base_url = %client.base_url(), "Marketplace client ready");

        Ok(Self {
            auth,
            listings: Arc::new(ListingsApi::new(client.clone())),
            favorites: Arc::new(FavoritesApi::new(client.clone())),
            sellers: Arc::new(SellersApi::new(client.clone())),
            uploads: Arc::new(UploadsApi::new(client.clone())),
            chat: Arc::new(ChatApi::new(client)),
        })
    }

    /// Chat use cases over this marketplace's chat gateway
    pub fn chat_service(&self) -> ChatService {
        ChatService::new(self.chat.clone())
    }

    /// Load configuration from the environment or a config file, then build
    ///
    /// # Errors
    /// `Config` when no valid configuration is found.
    pub fn load() -> ApiResult<Self> {
        let config = crate::config::load().map_err(|err| ApiError::config(err.to_string()))?;
        Self::from_config(&config)
    }
}
