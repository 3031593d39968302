// Profile read/write plus the public portfolio aggregate.
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::TokenQuery;
use crate::api::Envelope;
use crate::error::ApiError;
use crate::models::{
    Achievement, Contract, Education, Image, Job, Language, Product, Skill, Target,
    UpdateProfileRequest,
};
use crate::resource::product_image::ProductImageController;
use crate::resource::profile::ProfileController;
use crate::resource::ResourceController;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    pub user_id: Option<String>,
}

/// POST /profile?token=
pub async fn update_profile(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Envelope, ApiError> {
    ProfileController::new(&state.gateway)
        .upsert(query.token.as_deref(), &payload)
        .await
}

/// GET /profile?token=
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Envelope, ApiError> {
    ProfileController::new(&state.gateway)
        .get(query.token.as_deref())
        .await
}

/// GET /profile/public[?user_id=]
pub async fn get_public_profile(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Result<Envelope, ApiError> {
    ProfileController::new(&state.gateway)
        .get_public(query.user_id.as_deref())
        .await
}

fn empty_aggregate() -> Value {
    json!({
        "status": "success",
        "message": "No profile found",
        "profile": null,
        "images": { "data": [] },
        "educations": { "data": [] },
        "jobs": { "data": [] },
        "languages": { "data": [] },
        "contracts": { "data": [] },
        "achievements": { "data": [] },
        "products": { "data": [] },
        "product_images": { "data": [] },
        "skills": { "data": [] },
        "targets": { "data": [] },
    })
}

/// GET /profile/public/all - fan out to every resource's public read for the
/// resolved owner and aggregate into one response object.
pub async fn get_public_profile_all(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let gateway = &state.gateway;

    // A failed or absent profile short-circuits to an empty-but-valid
    // aggregate rather than propagating.
    let profile = match ProfileController::new(gateway).get_public(None).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("public profile fetch failed: {}", e);
            return Ok(Json(empty_aggregate()));
        }
    };
    let owner = match profile
        .data
        .as_ref()
        .and_then(|d| d.get("id"))
        .and_then(Value::as_str)
    {
        Some(id) => id.to_string(),
        None => return Ok(Json(empty_aggregate())),
    };

    let images = ResourceController::<Image>::new(gateway).list_public(&owner).await?;
    let educations = ResourceController::<Education>::new(gateway).list_public(&owner).await?;
    let jobs = ResourceController::<Job>::new(gateway).list_public(&owner).await?;
    let languages = ResourceController::<Language>::new(gateway).list_public(&owner).await?;
    let contracts = ResourceController::<Contract>::new(gateway).list_public(&owner).await?;
    let achievements = ResourceController::<Achievement>::new(gateway).list_public(&owner).await?;
    let products = ResourceController::<Product>::new(gateway).list_public(&owner).await?;
    let product_images = ProductImageController::new(gateway).list_public(&owner, None).await?;
    let skills = ResourceController::<Skill>::new(gateway).list_public(&owner).await?;
    let targets = ResourceController::<Target>::new(gateway).list_public(&owner).await?;

    Ok(Json(json!({
        "status": "success",
        "profile": profile,
        "images": images,
        "educations": educations,
        "jobs": jobs,
        "languages": languages,
        "contracts": contracts,
        "achievements": achievements,
        "products": products,
        "product_images": product_images,
        "skills": skills,
        "targets": targets,
    })))
}
