use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Target;

impl Resource for Target {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "targets",
        owner_field: "profile_id",
        label: "Target",
    };
    type Create = CreateTargetRequest;
    type Update = UpdateTargetRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTargetRequest {
    pub target: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTargetRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub target: Patch<String>,
}
