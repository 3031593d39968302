// Narrow interfaces over the external table/auth platform.
//
// Every controller talks to the store through `TableStore` and `AuthProvider`
// only; the concrete HTTP client lives in `supabase.rs`.
pub mod supabase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use supabase::SupabaseClient;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("store rejected request ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The auth provider rejected a token or credentials.
    #[error("{0}")]
    AuthRejected(String),

    #[error("unexpected store response: {0}")]
    BadResponse(String),
}

/// Authenticated identity as reported by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

/// Result of a successful credential sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: Option<String>,
}

/// A single column condition on a table query.
#[derive(Debug, Clone)]
pub enum Condition {
    Eq(String, Value),
    In(String, Vec<Value>),
}

/// Conjunction of column conditions, built fluently:
/// `Where::new().eq("id", id).eq("profile_id", owner)`.
#[derive(Debug, Clone, Default)]
pub struct Where {
    conditions: Vec<Condition>,
    limit: Option<u32>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(column.into(), value.into()));
        self
    }

    pub fn is_in(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.conditions.push(Condition::In(column.into(), values));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn max_rows(&self) -> Option<u32> {
        self.limit
    }
}

/// Row-oriented access to the external table store.
///
/// Mutating calls return the affected rows (`return=representation`); an empty
/// result on insert/update means the store did not produce the expected row.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError>;
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, StoreError>;
    async fn update(&self, table: &str, filter: &Where, patch: Value) -> Result<Vec<Value>, StoreError>;
    async fn upsert(&self, table: &str, row: Value, on_conflict: &str) -> Result<Vec<Value>, StoreError>;
    async fn delete(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError>;
}

/// Credential and token operations, delegated to the external identity
/// provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, StoreError>;
    async fn get_user(&self, token: &str) -> Result<AuthUser, StoreError>;

    /// Liveness probe against the provider, used by /health.
    async fn health(&self) -> Result<(), StoreError>;
}
