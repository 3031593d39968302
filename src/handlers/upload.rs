// Binary image uploads: hosted provider or local disk, selected at startup.
use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use super::TokenQuery;
use crate::error::ApiError;
use crate::AppState;

/// POST /upload/image
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    handle_upload(&state, query, multipart, "images").await
}

/// POST /upload/product-image
pub async fn upload_product_image(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    handle_upload(&state, query, multipart, "products").await
}

fn extension_of(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| format!(".{}", ext))
        .unwrap_or_else(|| ".jpg".to_string())
}

async fn handle_upload(
    state: &AppState,
    query: TokenQuery,
    mut multipart: Multipart,
    folder: &str,
) -> Result<Json<Value>, ApiError> {
    // Token is optional on upload routes; verify it when supplied.
    if let Some(token) = query.token.as_deref().filter(|t| !t.trim().is_empty()) {
        state.gateway.verify(Some(token)).await?;
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(ApiError::validation("File must be an image"));
        }

        let id = format!("{}{}", Uuid::new_v4(), extension_of(field.file_name()));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read upload: {}", e)))?
            .to_vec();

        let image = state.images.upload(bytes, folder, &id).await?;
        return Ok(Json(json!({
            "status": "success",
            "message": "Upload successful",
            "image_url": image.url,
            "public_id": image.public_id,
        })));
    }

    Err(ApiError::validation("Missing file field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_falls_back_to_jpg() {
        assert_eq!(extension_of(Some("photo.PNG")), ".PNG");
        assert_eq!(extension_of(Some("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Some("noext")), ".jpg");
        assert_eq!(extension_of(None), ".jpg");
    }
}
