// Authorization-scoped resource access: token verification, privileged
// handle, ownership-filtered CRUD, response envelope.
pub mod product_image;
pub mod profile;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::api::Envelope;
use crate::error::ApiError;
use crate::gateway::AccessGateway;
use crate::store::Where;

/// Static configuration for one resource table.
pub struct ResourceSpec {
    /// Backing table name.
    pub table: &'static str,
    /// Column holding the owning identity id.
    pub owner_field: &'static str,
    /// Capitalized noun for envelope and error messages ("Job").
    pub label: &'static str,
}

impl ResourceSpec {
    fn noun(&self) -> String {
        self.label.to_lowercase()
    }
}

/// A directly-owned resource served by the generic controller.
///
/// `Create` payloads carry the client-settable columns only; the owner
/// reference is injected from the verified identity. `Update` payloads use
/// tri-state [`crate::models::Patch`] fields so partial updates serialize
/// exactly the fields the caller set.
pub trait Resource: Send + Sync + 'static {
    const SPEC: ResourceSpec;
    type Create: DeserializeOwned + Serialize + Send + Sync + 'static;
    type Update: DeserializeOwned + Serialize + Send + Sync + 'static;
}

/// Generic controller instantiated per resource type.
pub struct ResourceController<'a, R: Resource> {
    gateway: &'a AccessGateway,
    _marker: std::marker::PhantomData<R>,
}

pub(crate) fn as_object(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::validation(format!("expected object payload, got: {}", other))),
    }
}

impl<'a, R: Resource> ResourceController<'a, R> {
    pub fn new(gateway: &'a AccessGateway) -> Self {
        Self { gateway, _marker: std::marker::PhantomData }
    }

    fn owned(owner: &str) -> Where {
        Where::new().eq(R::SPEC.owner_field, owner)
    }

    fn owned_row(id: &str, owner: &str) -> Where {
        Where::new().eq("id", id).eq(R::SPEC.owner_field, owner)
    }

    pub async fn create(&self, token: Option<&str>, payload: &R::Create) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        let mut row = as_object(serde_json::to_value(payload)?)?;
        // Owner reference comes from the verified identity, never the client.
        row.insert(R::SPEC.owner_field.to_string(), json!(owner));

        let rows = store.insert(R::SPEC.table, Value::Object(row)).await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::storage(format!("Failed to create {}", R::SPEC.noun())))?;

        Ok(Envelope::row_with_message(
            format!("{} created successfully", R::SPEC.label),
            created,
        ))
    }

    pub async fn list(&self, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let rows = self
            .gateway
            .privileged()
            .select(R::SPEC.table, &Self::owned(&owner.to_string()))
            .await?;
        Ok(Envelope::rows(rows))
    }

    pub async fn get(&self, id: &str, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let rows = self
            .gateway
            .privileged()
            .select(R::SPEC.table, &Self::owned_row(id, &owner.to_string()))
            .await?;

        // A row under another owner is indistinguishable from a missing row.
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found(format!("{} not found", R::SPEC.label)))?;
        Ok(Envelope::row(row))
    }

    pub async fn update(
        &self,
        id: &str,
        token: Option<&str>,
        payload: &R::Update,
    ) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        // Existence + ownership probe before mutating. A concurrent delete
        // between this check and the update is an accepted race.
        let existing = store
            .select(R::SPEC.table, &Self::owned_row(id, &owner.to_string()))
            .await?;
        if existing.is_empty() {
            return Err(ApiError::not_found(format!("{} not found", R::SPEC.label)));
        }

        let patch = as_object(serde_json::to_value(payload)?)?;
        if patch.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }

        let rows = store
            .update(R::SPEC.table, &Where::new().eq("id", id), Value::Object(patch))
            .await?;
        let updated = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::storage(format!("Failed to update {}", R::SPEC.noun())))?;

        Ok(Envelope::row_with_message(
            format!("{} updated successfully", R::SPEC.label),
            updated,
        ))
    }

    pub async fn delete(&self, id: &str, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        let existing = store
            .select(R::SPEC.table, &Self::owned_row(id, &owner.to_string()))
            .await?;
        if existing.is_empty() {
            return Err(ApiError::not_found(format!("{} not found", R::SPEC.label)));
        }

        store.delete(R::SPEC.table, &Where::new().eq("id", id)).await?;
        Ok(Envelope::message(format!("{} deleted successfully", R::SPEC.label)))
    }

    /// Public read: no identity, rows scoped only by the supplied owner id.
    /// Intentional public-portfolio surface, not a security boundary.
    pub async fn list_public(&self, owner_id: &str) -> Result<Envelope, ApiError> {
        let rows = self
            .gateway
            .public()
            .select(R::SPEC.table, &Self::owned(owner_id))
            .await?;
        Ok(Envelope::rows(rows))
    }
}
