use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Language;

impl Resource for Language {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "languages",
        owner_field: "profile_id",
        label: "Language",
    };
    type Create = CreateLanguageRequest;
    type Update = UpdateLanguageRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLanguageRequest {
    pub language: String,
    pub level: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateLanguageRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub language: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub level: Patch<String>,
}
