// In-memory stand-ins for the external platform, used by tests only.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::gateway::AccessGateway;
use crate::store::{AuthProvider, AuthUser, Condition, Session, StoreError, TableStore, Where};
use crate::upload::{ImageHost, UploadError, UploadedImage};
use crate::AppState;

/// Table store backed by per-table row vectors. Mutations mirror the real
/// platform's `return=representation` behavior by returning affected rows.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

fn matches(row: &Value, filter: &Where) -> bool {
    filter.conditions().iter().all(|condition| match condition {
        Condition::Eq(column, value) => row.get(column) == Some(value),
        Condition::In(column, values) => row
            .get(column)
            .map(|v| values.contains(v))
            .unwrap_or(false),
    })
}

fn merge(row: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(changes)) = (row, patch) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, filter)).cloned().collect())
            .unwrap_or_default();
        if let Some(limit) = filter.max_rows() {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Value) -> Result<Vec<Value>, StoreError> {
        if let Value::Object(map) = &mut row {
            map.entry("id".to_string())
                .or_insert_with(|| json!(Uuid::new_v4().to_string()));
        }
        let mut tables = self.tables.lock().unwrap();
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, table: &str, filter: &Where, patch: Value) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut updated = vec![];
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches(r, filter)) {
                merge(row, &patch);
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn upsert(&self, table: &str, mut row: Value, on_conflict: &str) -> Result<Vec<Value>, StoreError> {
        let key = row.get(on_conflict).cloned();
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(key) = key {
            if let Some(existing) = rows.iter_mut().find(|r| r.get(on_conflict) == Some(&key)) {
                merge(existing, &row);
                return Ok(vec![existing.clone()]);
            }
        }

        if let Value::Object(map) = &mut row {
            map.entry("id".to_string())
                .or_insert_with(|| json!(Uuid::new_v4().to_string()));
        }
        rows.push(row.clone());
        Ok(vec![row])
    }

    async fn delete(&self, table: &str, filter: &Where) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut removed = vec![];
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| {
                if matches(row, filter) {
                    removed.push(row.clone());
                    false
                } else {
                    true
                }
            });
        }
        Ok(removed)
    }
}

/// Identity provider with registered credentials and issued tokens.
#[derive(Default)]
pub struct MemoryAuth {
    users: Mutex<HashMap<String, (String, Uuid)>>,
    tokens: Mutex<HashMap<String, Uuid>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return their identity id.
    pub fn add_user(&self, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), id));
        id
    }

    /// Issue a valid token for a fresh identity.
    pub fn issue_token(&self) -> (String, Uuid) {
        let id = Uuid::new_v4();
        let token = format!("token-{}", Uuid::new_v4().simple());
        self.tokens.lock().unwrap().insert(token.clone(), id);
        (token, id)
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some((stored, id)) if stored == password => {
                let token = format!("token-{}", Uuid::new_v4().simple());
                let id = *id;
                drop(users);
                self.tokens.lock().unwrap().insert(token.clone(), id);
                Ok(Session {
                    user: AuthUser {
                        id: id.to_string(),
                        email: Some(email.to_string()),
                        created_at: None,
                    },
                    access_token: Some(token),
                })
            }
            _ => Err(StoreError::AuthRejected("Invalid login credentials".into())),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(StoreError::Provider {
                status: 400,
                message: "User already registered".into(),
            });
        }
        let id = Uuid::new_v4();
        users.insert(email.to_string(), (password.to_string(), id));
        Ok(AuthUser {
            id: id.to_string(),
            email: Some(email.to_string()),
            created_at: None,
        })
    }

    async fn get_user(&self, token: &str) -> Result<AuthUser, StoreError> {
        match self.tokens.lock().unwrap().get(token) {
            Some(id) => Ok(AuthUser {
                id: id.to_string(),
                email: None,
                created_at: None,
            }),
            None => Err(StoreError::AuthRejected("Invalid token".into())),
        }
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Image host that records uploads instead of talking to a provider.
#[derive(Default)]
pub struct MemoryImageHost {
    pub uploads: Mutex<Vec<(String, String, usize)>>,
}

#[async_trait]
impl ImageHost for MemoryImageHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        id: &str,
    ) -> Result<UploadedImage, UploadError> {
        self.uploads
            .lock()
            .unwrap()
            .push((folder.to_string(), id.to_string(), bytes.len()));
        Ok(UploadedImage {
            url: format!("memory://{}/{}", folder, id),
            public_id: format!("{}/{}", folder, id),
            format: None,
            width: None,
            height: None,
            bytes: Some(bytes.len() as u64),
        })
    }

    async fn delete(&self, _public_id: &str) -> Result<(), UploadError> {
        Ok(())
    }
}

/// One in-memory platform per test: shared store + auth, gateway and app
/// state built on demand.
pub struct TestPlatform {
    pub store: Arc<MemoryStore>,
    pub auth: Arc<MemoryAuth>,
    pub images: Arc<MemoryImageHost>,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            auth: Arc::new(MemoryAuth::new()),
            images: Arc::new(MemoryImageHost::default()),
        }
    }

    pub fn issue_token(&self) -> (String, Uuid) {
        self.auth.issue_token()
    }

    pub fn gateway(&self) -> AccessGateway {
        AccessGateway::new(
            self.auth.clone(),
            self.store.clone(),
            self.store.clone(),
        )
    }

    pub fn state(&self) -> AppState {
        AppState {
            gateway: self.gateway(),
            images: self.images.clone(),
            uploads_dir: None,
        }
    }
}
