//! Marketplace API client
//!
//! `ApiClient` owns transport, retry and envelope handling. The feature
//! gateways (`ListingsApi`, `FavoritesApi`, ...) build paths, pick the auth
//! mode and map records to view models.
//!
//! # Architecture
//!
//! - Uses `HttpClient` (no direct reqwest in feature code)
//! - Fixed-delay retry from `greenloop-common`
//! - Every failure is an `ApiError`

pub mod auth;
pub mod chat;
pub mod client;
pub mod errors;
pub mod favorites;
pub mod listings;
pub mod sellers;
pub mod uploads;

pub use auth::{AccessTokenProvider, FileTokenStore, MemoryTokenStore, TokenStoreAuth};
pub use chat::ChatApi;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, AuthMode};
pub use favorites::FavoritesApi;
pub use listings::ListingsApi;
pub use sellers::SellersApi;
pub use uploads::UploadsApi;
