//! Image uploads

use serde::{Deserialize, Serialize};

/// `data` of a successful `POST /api/upload/listing_image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(alias = "imageUrl", alias = "image_url")]
    pub url: String,
}

/// An image file ready to be sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into(), bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
