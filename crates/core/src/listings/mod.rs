//! Listings: record mapping, client-side validation and gateway ports

pub mod mapping;
pub mod ports;
pub mod validation;

pub use mapping::{to_listing, to_listings, to_seller_summary};
pub use ports::{ImageUploader, ListingGateway};
pub use validation::{validate_new_listing, validate_update};
