use serde::{Deserialize, Serialize};

use super::{IsoDate, Patch};
use crate::resource::{Resource, ResourceSpec};

pub struct Education;

impl Resource for Education {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "educations",
        owner_field: "profile_id",
        label: "Education",
    };
    type Create = CreateEducationRequest;
    type Update = UpdateEducationRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEducationRequest {
    pub school_name: String,
    pub start_year: Option<IsoDate>,
    pub end_year: Option<IsoDate>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateEducationRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub school_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_year: Patch<IsoDate>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub end_year: Patch<IsoDate>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
}
