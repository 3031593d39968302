pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod resource;
pub mod store;
pub mod upload;

#[cfg(test)]
pub mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use gateway::AccessGateway;
use resource::Resource;
use upload::ImageHost;

/// Everything a handler needs, built once in main and injected via axum
/// state; no process-global clients.
#[derive(Clone)]
pub struct AppState {
    pub gateway: AccessGateway,
    pub images: Arc<dyn ImageHost>,
    /// Set when uploads are stored on local disk; mounts /uploads.
    pub uploads_dir: Option<PathBuf>,
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(upload_routes())
        .merge(resource_routes::<models::Image>("images"))
        .merge(resource_routes::<models::Education>("educations"))
        .merge(resource_routes::<models::Job>("jobs"))
        .merge(resource_routes::<models::Language>("languages"))
        .merge(resource_routes::<models::Contract>("contracts"))
        .merge(resource_routes::<models::Achievement>("achievements"))
        .merge(resource_routes::<models::Product>("products"))
        .merge(resource_routes::<models::Skill>("skills"))
        .merge(resource_routes::<models::Target>("targets"))
        .merge(product_image_routes());

    if let Some(dir) = &state.uploads_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/users/me", get(auth::users_me))
}

fn profile_routes() -> Router<AppState> {
    use handlers::profile;

    Router::new()
        .route("/profile", get(profile::get_profile).post(profile::update_profile))
        .route("/profile/public", get(profile::get_public_profile))
        .route("/profile/public/all", get(profile::get_public_profile_all))
}

fn upload_routes() -> Router<AppState> {
    use handlers::upload;

    Router::new()
        .route("/upload/image", post(upload::upload_image))
        .route("/upload/product-image", post(upload::upload_product_image))
}

/// The five canonical operations for one directly-owned resource.
fn resource_routes<R: Resource>(path: &str) -> Router<AppState> {
    use handlers::resource;

    Router::new()
        .route(
            &format!("/{}", path),
            post(resource::create::<R>).get(resource::list::<R>),
        )
        .route(
            &format!("/{}/:id", path),
            get(resource::get_one::<R>)
                .put(resource::update::<R>)
                .delete(resource::remove::<R>),
        )
}

fn product_image_routes() -> Router<AppState> {
    use handlers::product_image;

    Router::new()
        .route(
            "/product-images",
            post(product_image::create).get(product_image::list),
        )
        .route(
            "/product-images/:id",
            get(product_image::get_one)
                .put(product_image::update)
                .delete(product_image::remove),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "auth": "/login, /register, /users/me",
            "profile": "/profile, /profile/public, /profile/public/all",
            "resources": "/images, /educations, /jobs, /languages, /contracts, /achievements, /products, /product-images, /skills, /targets",
            "uploads": "/upload/image, /upload/product-image",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.gateway.auth().health().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": { "status": "ok", "timestamp": now, "auth_provider": "ok" }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "detail": format!("auth provider unavailable: {}", e),
            })),
        ),
    }
}
