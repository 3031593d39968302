use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Achievement;

impl Resource for Achievement {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "achievements",
        owner_field: "profile_id",
        label: "Achievement",
    };
    type Create = CreateAchievementRequest;
    type Update = UpdateAchievementRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAchievementRequest {
    pub achievement_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateAchievementRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub achievement_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
}
