use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

/// Products are directly owned, and also act as the ownership parent for
/// product images (see `resource::product_image`).
pub struct Product;

impl Resource for Product {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "products",
        owner_field: "profile_id",
        label: "Product",
    };
    type Create = CreateProductRequest;
    type Update = UpdateProductRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: String,
    pub product_url: Option<String>,
    pub product_image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub product_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub product_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub product_image: Patch<String>,
}
