use serde::{Deserialize, Serialize};

use super::Patch;
use crate::resource::{Resource, ResourceSpec};

pub struct Contract;

impl Resource for Contract {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "contracts",
        owner_field: "profile_id",
        label: "Contract",
    };
    type Create = CreateContractRequest;
    type Update = UpdateContractRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateContractRequest {
    pub contract_name: String,
    pub status: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateContractRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub contract_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<String>,
}
