//! Listing image upload

use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::{ApiError, ApiResult, FieldErrors};
use greenloop_core::ImageUploader;
use greenloop_domain::{ImageFile, UploadedImage};
use tracing::{debug, instrument};

use super::client::{ApiClient, AuthMode};

#[derive(Debug, Clone)]
pub struct UploadsApi {
    client: Arc<ApiClient>,
}

impl UploadsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageUploader for UploadsApi {
    #[instrument(skip(self, image), fields(file = %image.file_name))]
    async fn upload_listing_image(&self, image: ImageFile) -> ApiResult<String> {
        if image.is_empty() {
            let mut fields = FieldErrors::new();
            fields.insert("image".into(), vec!["Image file is empty".into()]);
            return Err(ApiError::validation("Image file is empty", fields));
        }

        let uploaded: UploadedImage = self
            .client
            .upload("/api/upload/listing_image", &image, AuthMode::Bearer, "Failed to upload image")
            .await
            .inspect_err(|err| debug!(error = %err, "upload_listing_image failed"))?;
        Ok(uploaded.url)
    }
}
