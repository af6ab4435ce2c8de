//! Client-side checks run before a listing is sent
//!
//! Every violation is collected so the form can highlight all bad fields
//! at once.

use greenloop_common::{ApiError, ApiResult, FieldErrors};
use greenloop_domain::constants::{MAX_ECO_SCORE, MAX_TITLE_LENGTH};
use greenloop_domain::{ListingUpdate, NewListing};

const INVALID_LISTING: &str = "Please fix the highlighted fields";

/// Validate a listing before `POST /api/listings`
///
/// # Errors
/// Returns a `Validation` error carrying one entry per offending field.
pub fn validate_new_listing(listing: &NewListing) -> ApiResult<()> {
    let mut errors = FieldErrors::new();

    check_title(&mut errors, &listing.title);
    require(&mut errors, "description", &listing.description, "Description is required");
    check_price(&mut errors, listing.price);
    require(&mut errors, "category", &listing.category, "Category is required");
    require(&mut errors, "condition", &listing.condition, "Condition is required");

    if let Some(score) = listing.eco_score {
        if score > MAX_ECO_SCORE {
            push(&mut errors, "eco_score", format!("Eco score must be at most {MAX_ECO_SCORE}"));
        }
    }

    finish(errors)
}

/// Validate the fields present in a partial update
///
/// # Errors
/// Returns a `Validation` error when a present field is invalid or when the
/// update carries no field at all.
pub fn validate_update(update: &ListingUpdate) -> ApiResult<()> {
    if update.is_empty() {
        return Err(ApiError::validation("Nothing to update", FieldErrors::new()));
    }

    let mut errors = FieldErrors::new();
    if let Some(title) = &update.title {
        check_title(&mut errors, title);
    }
    if let Some(description) = &update.description {
        require(&mut errors, "description", description, "Description is required");
    }
    if let Some(price) = update.price {
        check_price(&mut errors, price);
    }
    if let Some(category) = &update.category {
        require(&mut errors, "category", category, "Category is required");
    }
    if let Some(condition) = &update.condition {
        require(&mut errors, "condition", condition, "Condition is required");
    }

    finish(errors)
}

fn check_title(errors: &mut FieldErrors, title: &str) {
    let title = title.trim();
    if title.is_empty() {
        push(errors, "title", "Title is required".to_string());
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        push(errors, "title", format!("Title must be at most {MAX_TITLE_LENGTH} characters"));
    }
}

fn check_price(errors: &mut FieldErrors, price: f64) {
    if !price.is_finite() {
        push(errors, "price", "Price must be a number".to_string());
    } else if price < 0.0 {
        push(errors, "price", "Price cannot be negative".to_string());
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        push(errors, field, message.to_string());
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn finish(errors: FieldErrors) -> ApiResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(INVALID_LISTING, errors))
    }
}

#[cfg(test)]
mod tests {
    use greenloop_common::ErrorCode;

    use super::*;

    fn valid() -> NewListing {
        NewListing {
            title: "Refurbished bike".into(),
            description: "Steel frame, new tyres".into(),
            category: "sports".into(),
            condition: "good".into(),
            location: "Bristol".into(),
            price: 120.0,
            is_negotiable: true,
            eco_score: Some(80),
            eco_attributes: vec!["refurbished".into()],
            image_urls: vec![],
            seller_id: "s-1".into(),
        }
    }

    #[test]
    fn test_valid_listing_passes() {
        assert!(validate_new_listing(&valid()).is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let listing = NewListing {
            title: "x".repeat(MAX_TITLE_LENGTH + 1),
            description: "  ".into(),
            price: -1.0,
            eco_score: Some(101),
            ..valid()
        };

        let err = validate_new_listing(&listing).unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.status, 422);

        let fields = err.field_errors.unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "eco_score", "price", "title"]);
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let listing = NewListing { price: f64::NAN, ..valid() };
        let err = validate_new_listing(&listing).unwrap_err();
        assert_eq!(err.first_field_error(), Some(("price", "Price must be a number")));
    }

    #[test]
    fn test_title_length_counts_characters() {
        let listing = NewListing { title: "é".repeat(MAX_TITLE_LENGTH), ..valid() };
        assert!(validate_new_listing(&listing).is_ok());
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        let update = ListingUpdate { price: Some(10.0), ..Default::default() };
        assert!(validate_update(&update).is_ok());

        let update = ListingUpdate { title: Some(String::new()), ..Default::default() };
        assert!(validate_update(&update).is_err());

        assert!(validate_update(&ListingUpdate::default()).is_err());
    }
}
