use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IsoDate, Patch};

/// Partial-update payload for the profile row (1:1 with the identity, keyed
/// by the identity id; upserted rather than inserted/updated separately).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub first_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub last_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub nickname: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub avatar_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub cover_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub bio: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub location: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub hometown: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub marital_status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub date_of_birth: Patch<IsoDate>,
    /// Free-form extension map for fields the schema does not model.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub extra: Patch<Map<String, Value>>,
}
