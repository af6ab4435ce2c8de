//! Port interface for the auth token store

use async_trait::async_trait;
use greenloop_common::ApiResult;

/// Where the signed-in user's bearer token lives between sessions
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The stored token, `None` when signed out
    async fn load(&self) -> ApiResult<Option<String>>;

    /// Persist a token after sign-in
    async fn save(&self, token: &str) -> ApiResult<()>;

    /// Forget the token on sign-out
    async fn clear(&self) -> ApiResult<()>;
}
