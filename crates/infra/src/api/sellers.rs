//! Seller profile endpoints

use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_core::feedback::{contextualize, Subject};
use greenloop_core::sellers::to_seller_profile;
use greenloop_core::SellerGateway;
use greenloop_domain::{BioUpdate, SellerProfile, SellerRecord};
use tracing::{debug, instrument};

use super::client::{segment, ApiClient, AuthMode};

const VIEW: Subject<'static> = Subject::new("Seller", "view this seller");
const EDIT: Subject<'static> = Subject::new("Seller", "edit this profile");

#[derive(Debug, Clone)]
pub struct SellersApi {
    client: Arc<ApiClient>,
}

impl SellersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SellerGateway for SellersApi {
    #[instrument(skip(self))]
    async fn fetch_seller_bio(&self, seller_uuid: &str) -> ApiResult<SellerProfile> {
        let record: SellerRecord = self
            .client
            .get(
                &format!("/api/sellers/bio/{}", segment(seller_uuid)),
                &[],
                AuthMode::Public,
                "Failed to load seller",
            )
            .await
            .map_err(|err| contextualize(err, VIEW))
            .inspect_err(|err| debug!(error = %err, "fetch_seller_bio failed"))?;
        Ok(to_seller_profile(&record))
    }

    #[instrument(skip(self, bio))]
    async fn update_seller_bio(&self, seller_uuid: &str, bio: &str) -> ApiResult<SellerProfile> {
        let body = BioUpdate { bio: bio.trim().to_string() };
        let record: SellerRecord = self
            .client
            .put(
                &format!("/api/sellers/bio/{}", segment(seller_uuid)),
                &body,
                AuthMode::Bearer,
                "Failed to update bio",
            )
            .await
            .map_err(|err| contextualize(err, EDIT))
            .inspect_err(|err| debug!(error = %err, "update_seller_bio failed"))?;
        Ok(to_seller_profile(&record))
    }
}
