use serde::{Deserialize, Serialize};

use super::{IsoDate, Patch};
use crate::resource::{Resource, ResourceSpec};

/// Marker type binding the jobs table to the generic controller.
pub struct Job;

impl Resource for Job {
    const SPEC: ResourceSpec = ResourceSpec {
        table: "jobs",
        owner_field: "profile_id",
        label: "Job",
    };
    type Create = CreateJobRequest;
    type Update = UpdateJobRequest;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub job_name: String,
    pub company_name: String,
    pub start_date: Option<IsoDate>,
    /// Free text; may be a date string or "Now".
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub job_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub company_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_date: Patch<IsoDate>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub end_date: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
}
