//! Bearer token access and storage
//!
//! The API client asks an [`AccessTokenProvider`] for a token on every
//! authenticated call. [`TokenStoreAuth`] answers from a [`TokenStore`],
//! which is either a JSON file or process memory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::{ApiError, ApiResult};
use greenloop_core::TokenStore;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::InfraError;

/// Message carried by `AuthRequired` when no token is stored
pub const SIGN_IN_REQUIRED: &str = "Please sign in to continue.";

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get the bearer token for an authenticated call
    ///
    /// Returns `AuthRequired` when the user is signed out.
    async fn access_token(&self) -> ApiResult<String>;
}

/// Access tokens backed by a [`TokenStore`]
#[derive(Clone)]
pub struct TokenStoreAuth {
    store: Arc<dyn TokenStore>,
}

impl TokenStoreAuth {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Remember the token returned by a sign-in
    pub async fn sign_in(&self, token: &str) -> ApiResult<()> {
        if token.trim().is_empty() {
            return Err(ApiError::auth_required("Received an empty token"));
        }
        self.store.save(token.trim()).await
    }

    pub async fn sign_out(&self) -> ApiResult<()> {
        self.store.clear().await
    }

    pub async fn is_signed_in(&self) -> ApiResult<bool> {
        Ok(self.store.load().await?.is_some())
    }
}

#[async_trait]
impl AccessTokenProvider for TokenStoreAuth {
    async fn access_token(&self) -> ApiResult<String> {
        self.store
            .load()
            .await?
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::auth_required(SIGN_IN_REQUIRED))
    }
}

/// Token held in process memory
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> ApiResult<Option<String>> {
        Ok(self.token.read().clone())
    }

    async fn save(&self, token: &str) -> ApiResult<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> ApiResult<()> {
        *self.token.write() = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// Token persisted as `{"token": "..."}` in a local file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> ApiResult<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No token file");
                return Ok(None);
            }
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let file: TokenFile = serde_json::from_str(&contents).map_err(|err| {
            ApiError::config(format!("Corrupt token file {}: {err}", self.path.display()))
        })?;
        Ok(Some(file.token))
    }

    async fn save(&self, token: &str) -> ApiResult<()> {
        let contents = serde_json::to_string(&TokenFile { token: token.to_string() })
            .map_err(|err| ApiError::unknown(format!("Failed to encode token: {err}")))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_private(&path, contents.as_bytes()))
            .await
            .map_err(|err| ApiError::unknown(format!("Token write task failed: {err}")))??;

        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    async fn clear(&self) -> ApiResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

/// Replace `path` atomically with an owner-only (0600 on unix) file
///
/// The bytes go to a temp file in the same directory, which is synced and
/// then renamed over `path`.
fn write_private(path: &Path, contents: &[u8]) -> ApiResult<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(InfraError::from)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".token").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o600));
    }

    let mut file = builder.tempfile_in(dir).map_err(InfraError::from)?;
    file.write_all(contents).map_err(InfraError::from)?;
    file.as_file().sync_all().map_err(InfraError::from)?;
    file.persist(path).map_err(|err| InfraError::from(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use greenloop_common::ErrorCode;

    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.save("abc").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("abc"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth").join("token.json"));

        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();

        store.save("tok-1").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("tok-1"));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"token":"tok-1"}"#);
    }

    #[tokio::test]
    async fn test_file_store_overwrites_atomically_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));

        store.save("first").await.unwrap();
        store.save("second").await.unwrap();

        assert_eq!(store.load().await.unwrap().as_deref(), Some("second"));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_token_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        store.save("secret").await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "token file mode is {:o}", mode & 0o777);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileTokenStore::new(&path).load().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[tokio::test]
    async fn test_token_store_auth() {
        let auth = TokenStoreAuth::new(Arc::new(MemoryTokenStore::new()));

        let err = auth.access_token().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert!(!auth.is_signed_in().await.unwrap());

        auth.sign_in(" tok-2 ").await.unwrap();
        assert_eq!(auth.access_token().await.unwrap(), "tok-2");

        auth.sign_out().await.unwrap();
        assert!(auth.access_token().await.is_err());
    }
}
