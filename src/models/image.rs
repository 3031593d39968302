use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Image;

impl Resource for Image {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "images",
        owner_field: "profile_id",
        label: "Image",
    };
    type Create = CreateImageRequest;
    type Update = UpdateImageRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateImageRequest {
    pub images_url: String,
    pub image_type: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateImageRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub images_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub image_type: Patch<String>,
}
