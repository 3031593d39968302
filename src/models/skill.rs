use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Skill;

impl Resource for Skill {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "skills",
        owner_field: "profile_id",
        label: "Skill",
    };
    type Create = CreateSkillRequest;
    type Update = UpdateSkillRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSkillRequest {
    pub skill_name: String,
    pub level: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateSkillRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub skill_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub level: Patch<String>,
}
