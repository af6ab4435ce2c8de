//! # Greenloop Infrastructure
//!
//! Implementations of the `greenloop-core` ports over HTTP and local files.
//!
//! This crate contains:
//! - The API client (retry, auth, envelope handling)
//! - Feature gateways for listings, favorites, sellers, uploads and chat
//! - Token stores (file and memory)
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `greenloop-core`
//! - Depends on `greenloop-common`, `greenloop-domain` and `greenloop-core`
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod marketplace;
pub mod observability;

// Re-export commonly used items
pub use api::*;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use marketplace::Marketplace;
pub use observability::init_logging;
