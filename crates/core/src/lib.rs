//! # Greenloop Core
//!
//! Client-side business logic - no HTTP or storage code.
//!
//! This crate contains:
//! - Mapping from server records to view models
//! - Client-side validation
//! - Conversation transforms and the optimistic chat flow
//! - User-facing error text
//! - Port interfaces (traits) implemented by `greenloop-infra`
//!
//! ## Architecture Principles
//! - Depends on `greenloop-common` and `greenloop-domain` only
//! - All remote access goes through the gateway traits
//! - Pure, testable logic

pub mod auth;
pub mod chat;
pub mod favorites;
pub mod feedback;
pub mod listings;
pub mod sellers;

pub use auth::TokenStore;
pub use chat::{ChatGateway, ChatService};
pub use favorites::FavoriteGateway;
pub use feedback::{describe, Subject};
pub use listings::{ImageUploader, ListingGateway};
pub use sellers::SellerGateway;
