// Product image handlers; ownership checks route through the parent product.
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::TokenQuery;
use crate::api::Envelope;
use crate::error::ApiError;
use crate::models::{CreateProductImageRequest, UpdateProductImageRequest};
use crate::resource::product_image::ProductImageController;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub token: Option<String>,
    pub product_id: Option<String>,
}

/// POST /product-images?token=
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<CreateProductImageRequest>,
) -> Result<Envelope, ApiError> {
    ProductImageController::new(&state.gateway)
        .create(query.token.as_deref(), &payload)
        .await
}

/// GET /product-images?token=&product_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Envelope, ApiError> {
    ProductImageController::new(&state.gateway)
        .list(query.token.as_deref(), query.product_id.as_deref())
        .await
}

/// GET /product-images/:id?token=
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ProductImageController::new(&state.gateway)
        .get(&id, query.token.as_deref())
        .await
}

/// PUT /product-images/:id?token=
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<UpdateProductImageRequest>,
) -> Result<Envelope, ApiError> {
    ProductImageController::new(&state.gateway)
        .update(&id, query.token.as_deref(), &payload)
        .await
}

/// DELETE /product-images/:id?token=
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ProductImageController::new(&state.gateway)
        .delete(&id, query.token.as_deref())
        .await
}
