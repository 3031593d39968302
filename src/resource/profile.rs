// Profile: 1:1 with the identity, upserted by primary key.
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::Envelope;
use crate::error::ApiError;
use crate::gateway::AccessGateway;
use crate::models::UpdateProfileRequest;
use crate::resource::as_object;
use crate::store::Where;

pub const PROFILE_TABLE: &str = "profiles";

pub struct ProfileController<'a> {
    gateway: &'a AccessGateway,
}

impl<'a> ProfileController<'a> {
    pub fn new(gateway: &'a AccessGateway) -> Self {
        Self { gateway }
    }

    /// Insert-or-update the caller's profile row. The row may or may not
    /// exist yet, so this is an upsert keyed on the identity id; an
    /// updated-timestamp is written alongside the caller's fields.
    pub async fn upsert(
        &self,
        token: Option<&str>,
        payload: &UpdateProfileRequest,
    ) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;

        let mut row = as_object(serde_json::to_value(payload)?)?;
        row.insert("id".to_string(), json!(owner));
        row.insert("update_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .gateway
            .privileged()
            .upsert(PROFILE_TABLE, Value::Object(row), "id")
            .await?;
        let stored = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::storage("Failed to update profile"))?;

        Ok(Envelope::row_with_message("Profile updated successfully", stored))
    }

    /// A missing profile is a success with `data: null`, not a 404; the row
    /// legitimately may not exist yet for a fresh identity.
    pub async fn get(&self, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let rows = self
            .gateway
            .privileged()
            .select(PROFILE_TABLE, &Where::new().eq("id", owner.to_string()))
            .await?;

        Ok(match rows.into_iter().next() {
            Some(row) => Envelope::row(row),
            None => Envelope::empty_row("Profile not found"),
        })
    }

    /// Public read: a specific profile by supplied id, or the first profile
    /// when none is given (single-owner portfolio deployments).
    pub async fn get_public(&self, owner_id: Option<&str>) -> Result<Envelope, ApiError> {
        let filter = match owner_id {
            Some(id) => Where::new().eq("id", id),
            None => Where::new().limit(1),
        };

        let rows = self.gateway.public().select(PROFILE_TABLE, &filter).await?;
        Ok(match rows.into_iter().next() {
            Some(row) => Envelope::row(row),
            None => Envelope::empty_row("Profile not found"),
        })
    }
}
