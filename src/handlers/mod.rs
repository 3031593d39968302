// HTTP handlers, grouped by surface: identity, profile, generic resources,
// product images, uploads.
pub mod auth;
pub mod product_image;
pub mod profile;
pub mod resource;
pub mod upload;

use serde::Deserialize;

/// Bearer token supplied as a `?token=` query parameter.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}
