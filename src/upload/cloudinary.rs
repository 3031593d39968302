// Cloudinary-compatible hosted image storage with signed requests.
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{ImageHost, UploadError, UploadedImage};
use crate::config::CloudinaryConfig;

pub struct CloudinaryHost {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.config.cloud_name, action
        )
    }
}

/// Signature base: parameters sorted by name, joined `k=v` with `&`.
/// `file`, `api_key` and the signature itself are never included.
fn signature_base(params: &BTreeMap<&str, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signature_base(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn provider_error(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown provider error")
        .to_string()
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        id: &str,
    ) -> Result<UploadedImage, UploadError> {
        // The provider keys by bare public id; strip any file extension the
        // caller folded into the generated name.
        let public_id = id.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(id);
        let folder = format!("uploads/{}", folder);
        let timestamp = Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("folder", folder.clone());
        params.insert("invalidate", "true".to_string());
        params.insert("overwrite", "true".to_string());
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = sign(&params, &self.config.api_secret);

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name("upload"))
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .text("folder", folder)
            .text("public_id", public_id.to_string())
            .text("overwrite", "true")
            .text("invalidate", "true");

        let resp = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(UploadError::Provider(provider_error(&body)));
        }

        let url = body
            .get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(Value::as_str)
            .ok_or_else(|| UploadError::Provider("response missing image url".into()))?
            .to_string();

        Ok(UploadedImage {
            url,
            public_id: body
                .get("public_id")
                .and_then(Value::as_str)
                .unwrap_or(public_id)
                .to_string(),
            format: body.get("format").and_then(Value::as_str).map(str::to_string),
            width: body.get("width").and_then(Value::as_u64),
            height: body.get("height").and_then(Value::as_u64),
            bytes: body.get("bytes").and_then(Value::as_u64),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), UploadError> {
        let timestamp = Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = sign(&params, &self.config.api_secret);

        let resp = self
            .http
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", &timestamp),
                ("api_key", &self.config.api_key),
                ("signature", &signature),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(UploadError::Provider(provider_error(&body)));
        }

        match body.get("result").and_then(Value::as_str) {
            Some("ok") | Some("not found") => Ok(()),
            other => Err(UploadError::Provider(format!(
                "unexpected destroy result: {:?}",
                other
            ))),
        }
    }
}
