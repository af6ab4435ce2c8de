//! Listing endpoints

use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_core::feedback::{contextualize, Subject};
use greenloop_core::listings::{to_listing, to_listings, validate_new_listing, validate_update};
use greenloop_core::ListingGateway;
use greenloop_domain::{Listing, ListingFilter, ListingRecord, ListingUpdate, NewListing};
use tracing::{debug, instrument};

use super::client::{segment, ApiClient, AuthMode};

const VIEW: Subject<'static> = Subject::new("Listing", "view this listing");
const EDIT: Subject<'static> = Subject::new("Listing", "edit this listing");
const DELETE: Subject<'static> = Subject::new("Listing", "delete this listing");

/// HTTP implementation of [`ListingGateway`]
#[derive(Debug, Clone)]
pub struct ListingsApi {
    client: Arc<ApiClient>,
}

impl ListingsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingGateway for ListingsApi {
    #[instrument(skip(self))]
    async fn fetch_listings(&self, filter: &ListingFilter) -> ApiResult<Vec<Listing>> {
        let records: Vec<ListingRecord> = self
            .client
            .get("/listings", &filter.query_pairs(), AuthMode::Public, "Failed to load listings")
            .await
            .inspect_err(|err| debug!(error = %err, "fetch_listings failed"))?;
        Ok(to_listings(&records))
    }

    #[instrument(skip(self))]
    async fn fetch_listing(&self, id: &str) -> ApiResult<Listing> {
        let record: ListingRecord = self
            .client
            .get(
                &format!("/listings/{}", segment(id)),
                &[],
                AuthMode::Public,
                "Failed to load listing",
            )
            .await
            .map_err(|err| contextualize(err, VIEW))
            .inspect_err(|err| debug!(error = %err, "fetch_listing failed"))?;
        Ok(to_listing(&record))
    }

    #[instrument(skip(self))]
    async fn fetch_seller_listings(&self, seller_id: &str) -> ApiResult<Vec<Listing>> {
        let records: Vec<ListingRecord> = self
            .client
            .get(
                &format!("/listings/seller/{}", segment(seller_id)),
                &[],
                AuthMode::Public,
                "Failed to load seller listings",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "fetch_seller_listings failed"))?;
        Ok(to_listings(&records))
    }

    #[instrument(skip(self, listing), fields(title = %listing.title))]
    async fn create_listing(&self, listing: &NewListing) -> ApiResult<Listing> {
        validate_new_listing(listing)?;
        let record: ListingRecord = self
            .client
            .post("/api/listings", listing, AuthMode::Bearer, "Failed to create listing")
            .await
            .inspect_err(|err| debug!(error = %err, "create_listing failed"))?;
        Ok(to_listing(&record))
    }

    #[instrument(skip(self, changes))]
    async fn update_listing(&self, id: &str, changes: &ListingUpdate) -> ApiResult<Listing> {
        validate_update(changes)?;
        let record: ListingRecord = self
            .client
            .put(
                &format!("/listings/{}", segment(id)),
                changes,
                AuthMode::Bearer,
                "Failed to update listing",
            )
            .await
            .map_err(|err| contextualize(err, EDIT))
            .inspect_err(|err| debug!(error = %err, "update_listing failed"))?;
        Ok(to_listing(&record))
    }

    #[instrument(skip(self))]
    async fn delete_listing(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/listings/{}", segment(id)), AuthMode::Bearer, "Failed to delete listing")
            .await
            .map_err(|err| contextualize(err, DELETE))
            .inspect_err(|err| debug!(error = %err, "delete_listing failed"))
    }
}
