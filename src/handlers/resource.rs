// Generic CRUD handlers, instantiated per resource type in the router.
use axum::extract::{Path, Query, State};
use axum::Json;

use super::TokenQuery;
use crate::api::Envelope;
use crate::error::ApiError;
use crate::resource::{Resource, ResourceController};
use crate::AppState;

/// POST /{resources}?token=
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<R::Create>,
) -> Result<Envelope, ApiError> {
    ResourceController::<R>::new(&state.gateway)
        .create(query.token.as_deref(), &payload)
        .await
}

/// GET /{resources}?token=
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ResourceController::<R>::new(&state.gateway)
        .list(query.token.as_deref())
        .await
}

/// GET /{resources}/:id?token=
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ResourceController::<R>::new(&state.gateway)
        .get(&id, query.token.as_deref())
        .await
}

/// PUT /{resources}/:id?token=
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<R::Update>,
) -> Result<Envelope, ApiError> {
    ResourceController::<R>::new(&state.gateway)
        .update(&id, query.token.as_deref(), &payload)
        .await
}

/// DELETE /{resources}/:id?token=
pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ResourceController::<R>::new(&state.gateway)
        .delete(&id, query.token.as_deref())
        .await
}
