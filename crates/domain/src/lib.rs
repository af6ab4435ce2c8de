//! # Greenloop Domain
//!
//! Marketplace data types for the Greenloop client.
//!
//! This crate contains:
//! - Server records and the view models derived from them
//! - The response envelope
//! - Client configuration and its error type
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Greenloop crates
//! - Only external dependencies allowed
//! - Pure data; mapping and validation live in `greenloop-core`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
