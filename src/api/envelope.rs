// Uniform success envelope returned by every operation.
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

/// `{ status, message?, data?, count? }`
///
/// Singular operations carry a single-row `data`; listings carry a `data`
/// array plus `count`. `data: Some(Value::Null)` serializes an explicit null
/// (profile-not-found), while `None` omits the field entirely (delete).
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Envelope {
    fn success() -> Self {
        Self {
            status: "success",
            message: None,
            data: None,
            count: None,
        }
    }

    /// Single-row result.
    pub fn row(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::success()
        }
    }

    /// Single-row result of a mutation, with a confirmation message.
    pub fn row_with_message(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
            ..Self::success()
        }
    }

    /// Listing result; count always present, 0 when empty.
    pub fn rows(rows: Vec<Value>) -> Self {
        Self {
            count: Some(rows.len()),
            data: Some(Value::Array(rows)),
            ..Self::success()
        }
    }

    /// Message-only result (delete).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success()
        }
    }

    /// Success with an explicit `data: null` (row legitimately absent).
    pub fn empty_row(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(Value::Null),
            ..Self::success()
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_envelope_includes_count() {
        let body = serde_json::to_value(Envelope::rows(vec![json!({"id": 1})])).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["count"], 1);
        assert!(body["data"].is_array());
    }

    #[test]
    fn message_envelope_omits_data() {
        let body = serde_json::to_value(Envelope::message("Job deleted successfully")).unwrap();
        assert!(body.get("data").is_none());
        assert!(body.get("count").is_none());
    }

    #[test]
    fn empty_row_serializes_explicit_null() {
        let body = serde_json::to_value(Envelope::empty_row("Profile not found")).unwrap();
        assert!(body["data"].is_null());
        assert!(body.as_object().unwrap().contains_key("data"));
    }
}
