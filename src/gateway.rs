// Access gateway: token verification and data-access handle selection.
use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{AuthProvider, StoreError, TableStore};

/// Resolves bearer tokens to identities and hands out data-access handles.
///
/// Constructed once at startup and injected into every controller; there is
/// no hidden global client. Tokens are re-verified on every request (cheap at
/// this scale; caching verified tokens is a possible later improvement).
#[derive(Clone)]
pub struct AccessGateway {
    auth: Arc<dyn AuthProvider>,
    privileged: Arc<dyn TableStore>,
    public: Arc<dyn TableStore>,
}

impl AccessGateway {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        privileged: Arc<dyn TableStore>,
        public: Arc<dyn TableStore>,
    ) -> Self {
        Self { auth, privileged, public }
    }

    /// Verify a bearer token against the identity provider and return the
    /// identity id. Absent or blank tokens fail without a remote call.
    pub async fn verify(&self, token: Option<&str>) -> Result<Uuid, ApiError> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ApiError::unauthorized("Missing token")),
        };

        let user = match self.auth.get_user(token).await {
            Ok(user) => user,
            Err(StoreError::AuthRejected(msg)) => return Err(ApiError::unauthorized(msg)),
            Err(other) => return Err(ApiError::unauthorized(format!("Invalid token: {}", other))),
        };

        Uuid::parse_str(&user.id)
            .map_err(|_| ApiError::unauthorized("Invalid token: malformed user id"))
    }

    /// Service-level handle that bypasses store-side row policies. Only for
    /// use after `verify` succeeds; ownership is enforced by the caller.
    pub fn privileged(&self) -> &dyn TableStore {
        self.privileged.as_ref()
    }

    /// Identity-free handle for endpoints explicitly marked public; callers
    /// must scope queries with an explicit owner id.
    pub fn public(&self) -> &dyn TableStore {
        self.public.as_ref()
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }
}
