// Supabase-compatible platform client: GoTrue auth + PostgREST tables.
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use url::Url;

use super::{AuthProvider, AuthUser, Condition, Session, StoreError, TableStore, Where};

/// HTTP client for one platform key (anonymous or service-role).
///
/// A privileged client is just a `SupabaseClient` constructed with the
/// service-role key; row-level policies are bypassed platform-side and
/// ownership is enforced by the controllers instead.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn rest_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| StoreError::BadResponse(format!("invalid table url: {}", e)))
    }

    fn auth_url(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!("auth/v1/{}", path))
            .map_err(|e| StoreError::BadResponse(format!("invalid auth url: {}", e)))
    }

    fn keyed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// Render one condition value as a PostgREST filter operand.
fn render_operand(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a string-or-scalar for use inside an `in.(...)` list; strings are
/// quoted so embedded commas cannot split the list.
fn render_list_item(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        other => other.to_string(),
    }
}

/// Translate a `Where` into PostgREST query parameters on `url`.
fn apply_filter(url: &mut Url, filter: &Where) {
    let mut pairs = url.query_pairs_mut();
    for condition in filter.conditions() {
        match condition {
            Condition::Eq(column, value) => {
                pairs.append_pair(column, &format!("eq.{}", render_operand(value)));
            }
            Condition::In(column, values) => {
                let list: Vec<String> = values.iter().map(render_list_item).collect();
                pairs.append_pair(column, &format!("in.({})", list.join(",")));
            }
        }
    }
    if let Some(limit) = filter.max_rows() {
        pairs.append_pair("limit", &limit.to_string());
    }
}

/// Pull a human-readable message out of a provider error body.
fn provider_message(body: &Value, status: StatusCode) -> String {
    for key in ["message", "error_description", "msg", "error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    format!("request failed with status {}", status)
}

async fn read_rows(resp: Response) -> Result<Vec<Value>, StoreError> {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(StoreError::Provider {
            status: status.as_u16(),
            message: provider_message(&body, status),
        });
    }

    match body {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(vec![]),
        // Some endpoints return a bare object for single-row responses
        obj @ Value::Object(_) => Ok(vec![obj]),
        other => Err(StoreError::BadResponse(format!("expected rows, got: {}", other))),
    }
}

fn user_from_value(body: &Value) -> Result<AuthUser, StoreError> {
    // sign-up responses nest the user when a session is issued alongside it
    let user = body.get("user").filter(|u| u.is_object()).unwrap_or(body);
    let id = user
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::BadResponse("auth response missing user id".into()))?;

    Ok(AuthUser {
        id: id.to_string(),
        email: user.get("email").and_then(Value::as_str).map(str::to_string),
        created_at: user.get("created_at").and_then(Value::as_str).map(str::to_string),
    })
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn select(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        apply_filter(&mut url, filter);

        let resp = self.keyed(self.http.get(url)).send().await?;
        read_rows(resp).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, StoreError> {
        let url = self.rest_url(table)?;
        let resp = self
            .keyed(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        read_rows(resp).await
    }

    async fn update(&self, table: &str, filter: &Where, patch: Value) -> Result<Vec<Value>, StoreError> {
        let mut url = self.rest_url(table)?;
        apply_filter(&mut url, filter);

        let resp = self
            .keyed(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        read_rows(resp).await
    }

    async fn upsert(&self, table: &str, row: Value, on_conflict: &str) -> Result<Vec<Value>, StoreError> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);

        let resp = self
            .keyed(self.http.post(url))
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;
        read_rows(resp).await
    }

    async fn delete(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError> {
        let mut url = self.rest_url(table)?;
        apply_filter(&mut url, filter);

        let resp = self
            .keyed(self.http.delete(url))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        read_rows(resp).await
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let mut url = self.auth_url("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let resp = self
            .keyed(self.http.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if status.is_client_error() {
            return Err(StoreError::AuthRejected(provider_message(&body, status)));
        }
        if !status.is_success() {
            return Err(StoreError::Provider {
                status: status.as_u16(),
                message: provider_message(&body, status),
            });
        }

        Ok(Session {
            user: user_from_value(&body)?,
            access_token: body
                .get("access_token")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, StoreError> {
        let url = self.auth_url("signup")?;
        let resp = self
            .keyed(self.http.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(StoreError::Provider {
                status: status.as_u16(),
                message: provider_message(&body, status),
            });
        }

        user_from_value(&body)
    }

    async fn get_user(&self, token: &str) -> Result<AuthUser, StoreError> {
        let url = self.auth_url("user")?;
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::AuthRejected("Invalid token".into()));
        }
        if !status.is_success() {
            return Err(StoreError::Provider {
                status: status.as_u16(),
                message: provider_message(&body, status),
            });
        }

        user_from_value(&body)
    }

    async fn health(&self) -> Result<(), StoreError> {
        let url = self.auth_url("health")?;
        let resp = self.keyed(self.http.get(url)).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Provider {
                status: resp.status().as_u16(),
                message: "auth provider unhealthy".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table_url(filter: &Where) -> Url {
        let mut url = Url::parse("https://example.supabase.co/rest/v1/jobs").unwrap();
        apply_filter(&mut url, filter);
        url
    }

    #[test]
    fn eq_conditions_become_postgrest_params() {
        let url = table_url(&Where::new().eq("id", "j1").eq("profile_id", "u1"));
        assert_eq!(url.query(), Some("id=eq.j1&profile_id=eq.u1"));
    }

    #[test]
    fn in_condition_quotes_string_items() {
        let url = table_url(&Where::new().is_in(
            "product_id",
            vec![json!("p1"), json!("p2")],
        ));
        let query = url.query().unwrap();
        assert!(query.contains("product_id=in."));
        let decoded: String = url.query_pairs().next().unwrap().1.into_owned();
        assert_eq!(decoded, "in.(\"p1\",\"p2\")");
    }

    #[test]
    fn limit_is_appended_last() {
        let url = table_url(&Where::new().eq("id", "x").limit(1));
        assert!(url.query().unwrap().ends_with("limit=1"));
    }

    #[test]
    fn provider_message_prefers_known_keys() {
        let body = json!({ "error_description": "Invalid login credentials" });
        assert_eq!(
            provider_message(&body, StatusCode::BAD_REQUEST),
            "Invalid login credentials"
        );
        assert_eq!(
            provider_message(&Value::Null, StatusCode::BAD_GATEWAY),
            "request failed with status 502 Bad Gateway"
        );
    }

    #[test]
    fn user_parsing_handles_nested_and_flat_shapes() {
        let flat = json!({ "id": "u1", "email": "a@b.c", "created_at": "2024-01-01T00:00:00Z" });
        let user = user_from_value(&flat).unwrap();
        assert_eq!(user.id, "u1");

        let nested = json!({ "access_token": "t", "user": { "id": "u2" } });
        let user = user_from_value(&nested).unwrap();
        assert_eq!(user.id, "u2");
        assert_eq!(user.email, None);
    }
}
