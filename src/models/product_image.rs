use serde::{Deserialize, Serialize};

use super::Patch;

// Product images are not served by the generic controller: ownership is
// indirect via the parent product, so they get a dedicated controller in
// `resource::product_image`.

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductImageRequest {
    pub product_id: String,
    pub image_url: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProductImageRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub image_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
}
