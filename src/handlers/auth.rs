// Identity endpoints, delegated entirely to the external auth provider.
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use super::TokenQuery;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::store::StoreError;
use crate::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    match state
        .gateway
        .auth()
        .sign_in(&credentials.email, &credentials.password)
        .await
    {
        Ok(session) => Ok(Json(json!({
            "status": "success",
            "message": "Login successful",
            "user": session.user,
            "access_token": session.access_token,
        }))),
        Err(StoreError::AuthRejected(_)) => {
            Err(ApiError::unauthorized("Invalid email or password"))
        }
        Err(e) => Err(ApiError::unknown(format!("Login failed: {}", e))),
    }
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(user_data): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    match state
        .gateway
        .auth()
        .sign_up(&user_data.email, &user_data.password)
        .await
    {
        Ok(user) => Ok(Json(json!({
            "status": "success",
            "message": "User registered successfully",
            "user": user,
        }))),
        Err(StoreError::Provider { message, .. })
            if message.to_lowercase().contains("already registered") =>
        {
            Err(ApiError::validation("Email already registered"))
        }
        Err(e) => Err(ApiError::unknown(format!("Registration failed: {}", e))),
    }
}

/// GET /users/me?token=
pub async fn users_me(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, ApiError> {
    let token = query
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    match state.gateway.auth().get_user(token).await {
        Ok(user) => Ok(Json(json!({ "status": "success", "user": user }))),
        Err(StoreError::AuthRejected(msg)) => Err(ApiError::unauthorized(msg)),
        Err(e) => Err(ApiError::unauthorized(format!("Invalid token: {}", e))),
    }
}
