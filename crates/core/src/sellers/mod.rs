//! Seller profiles

pub mod ports;

use greenloop_domain::constants::UNKNOWN_SELLER_NAME;
use greenloop_domain::{SellerProfile, SellerRecord};

pub use ports::SellerGateway;

pub fn to_seller_profile(record: &SellerRecord) -> SellerProfile {
    SellerProfile {
        id: record.id.clone(),
        username: record
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SELLER_NAME)
            .to_string(),
        bio: record.bio.as_deref().map(str::trim).unwrap_or_default().to_string(),
        rating: record.rating,
        verified: record.verified.unwrap_or(false),
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let record: SellerRecord =
            serde_json::from_str(r#"{"uuid": "s-7", "bio": " Repairs bikes ", "rating": "4.8"}"#)
                .unwrap();
        let profile = to_seller_profile(&record);

        assert_eq!(profile.id, "s-7");
        assert_eq!(profile.username, UNKNOWN_SELLER_NAME);
        assert_eq!(profile.bio, "Repairs bikes");
        assert_eq!(profile.rating, Some(4.8));
        assert!(!profile.verified);
    }
}
