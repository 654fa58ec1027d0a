use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

use crate::models::{AuthSnapshot, Role, VerifiedIdentity};

/// AuthError
///
/// Failures of a single credential check against the auth service. All
/// variants are converted to a plain "not authenticated" answer by
/// `AuthSession::check_auth`; nothing here escapes into the navigation
/// pipeline.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service answered, and the answer was "no": the credential is
    /// missing, expired or revoked.
    #[error("credential rejected by the auth service")]
    Rejected,
    /// The round trip itself failed (connection refused, timeout, DNS).
    #[error("auth service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with something this client cannot interpret.
    #[error("malformed auth service response: {0}")]
    Malformed(String),
}

// 1. AuthBackend Contract
/// AuthBackend
///
/// Abstract contract for the credential check behind re-validation. The
/// concrete implementation is the HTTP client (`HttpAuthBackend`) in the
/// running application and `MockAuthBackend` in tests, so guard behavior can
/// be exercised without a live auth service.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Verifies the given bearer credential with the auth service and
    /// returns the identity it vouches for. One attempt, no retry —
    /// transport-level retry is the service client's own concern.
    async fn verify(&self, token: Option<&str>) -> Result<VerifiedIdentity, AuthError>;
}

/// Shared handle to the configured auth backend.
pub type AuthBackendRef = Arc<dyn AuthBackend>;

// 2. The Real Implementation (HTTP)
/// HttpAuthBackend
///
/// Credential check against the backing API: GET `{base}/auth/check` with
/// the bearer token attached. The endpoint answers with the session's
/// current standing and role.
pub struct HttpAuthBackend {
    http: reqwest::Client,
    base_url: String,
}

/// Wire schema of the auth check endpoint.
#[derive(Debug, Deserialize)]
struct AuthCheckResponse {
    authenticated: bool,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn verify(&self, token: Option<&str>) -> Result<VerifiedIdentity, AuthError> {
        let mut request = self.http.get(format!("{}/auth/check", self.base_url));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        // 401/403 are definitive rejections, not transport faults.
        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Err(AuthError::Rejected);
        }

        let body: AuthCheckResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Malformed(e.to_string()))?;

        if !body.authenticated {
            return Err(AuthError::Rejected);
        }

        // An authenticated answer without a role cannot drive the guard's
        // role test; treat it as a contract violation by the service.
        let role = body
            .role
            .ok_or_else(|| AuthError::Malformed("authenticated response missing role".into()))?;

        Ok(VerifiedIdentity {
            role,
            // The check endpoint does not rotate credentials.
            token: None,
            expires_at: body.expires_at,
        })
    }
}

// 3. The Mock Implementation (For Unit Tests)
/// MockAuthBackend
///
/// Scripted backend used in tests: either vouches for a fixed identity or
/// rejects every check. Counts `verify` calls so tests can assert the
/// single-attempt re-validation policy.
pub struct MockAuthBackend {
    identity: Option<VerifiedIdentity>,
    calls: AtomicUsize,
}

impl MockAuthBackend {
    /// A backend that accepts every check and reports the given role.
    pub fn accepting(role: impl Into<Role>) -> Self {
        Self {
            identity: Some(VerifiedIdentity {
                role: role.into(),
                token: None,
                expires_at: None,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// A backend that rejects every check.
    pub fn rejecting() -> Self {
        Self {
            identity: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `verify` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn verify(&self, _token: Option<&str>) -> Result<VerifiedIdentity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identity.clone().ok_or(AuthError::Rejected)
    }
}

// 4. The Session (Auth State Provider)
/// AuthSession
///
/// The Auth State Provider: the single owner of the mutable session state.
/// Writers are this type's own methods (`login`, `logout`, `check_auth`);
/// every other component — the guard, the transport wrapper, the shell —
/// only ever reads a snapshot. That single-writer discipline is what makes
/// the shared state safe without any further coordination.
pub struct AuthSession {
    backend: AuthBackendRef,
    snapshot: RwLock<AuthSnapshot>,
}

impl AuthSession {
    /// Creates an unauthenticated session backed by the given credential
    /// checker.
    pub fn new(backend: AuthBackendRef) -> Self {
        Self {
            backend,
            snapshot: RwLock::new(AuthSnapshot::default()),
        }
    }

    /// A point-in-time copy of the session state.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().authenticated
    }

    pub fn role(&self) -> Option<Role> {
        self.read().role.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// login
    ///
    /// Installs an authenticated session. Called by the application's login
    /// flow once the auth service has issued a credential.
    pub fn login(&self, token: impl Into<String>, role: impl Into<Role>) {
        let mut state = self.write();
        *state = AuthSnapshot {
            authenticated: true,
            role: Some(role.into()),
            token: Some(token.into()),
            verified_at: Some(Utc::now()),
        };
    }

    /// logout
    ///
    /// Clears the session back to the unauthenticated state. Invoked by the
    /// user, or forcibly by the transport wrapper when the server rejects
    /// the credential mid-session.
    pub fn logout(&self) {
        let mut state = self.write();
        *state = AuthSnapshot::default();
    }

    /// check_auth
    ///
    /// The single re-validation attempt: asks the backend to verify the
    /// currently held credential and returns whether the resulting state is
    /// authenticated.
    ///
    /// On success the verified identity is installed into the session
    /// (role, rotated token if any, `verified_at` stamp). On ANY failure —
    /// rejection, transport fault, malformed answer — the session is left
    /// untouched and the answer is simply `false`; a failed re-validation
    /// must resolve to a login redirect, never to a fault in the navigation
    /// pipeline. No retry happens at this layer.
    pub async fn check_auth(&self) -> bool {
        let token = self.token();

        match self.backend.verify(token.as_deref()).await {
            Ok(identity) => {
                let mut state = self.write();
                let kept_token = identity.token.or_else(|| state.token.clone());
                *state = AuthSnapshot {
                    authenticated: true,
                    role: Some(identity.role),
                    token: kept_token,
                    verified_at: Some(Utc::now()),
                };
                tracing::debug!(role = ?state.role, "session re-validated");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "session re-validation failed");
                false
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AuthSnapshot> {
        self.snapshot.read().expect("auth state lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AuthSnapshot> {
        self.snapshot.write().expect("auth state lock poisoned")
    }
}
