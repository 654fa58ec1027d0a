use reqwest::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::AuthSession;

/// TransportError
///
/// Failures of one API request through the wrapper. A server-side credential
/// rejection is fully handled before this error is returned — the caller
/// sees a typed signal, never a raw unauthorized response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server rejected the session's credential. The session has already
    /// been cleared and the client redirected to the login entry.
    #[error("session rejected by the server; redirected to login")]
    Unauthorized,
    /// The request itself failed (connection, timeout, body assembly).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// RedirectSink
///
/// The hard-redirect surface the transport wrapper pushes the client through
/// when a session dies mid-flight. Injected so the host application decides
/// what "go to login" physically means; tests inject a recorder.
pub trait RedirectSink: Send + Sync {
    fn redirect_to_login(&self);
}

/// Shared handle to the configured redirect surface.
pub type RedirectSinkRef = Arc<dyn RedirectSink>;

/// ApiClient
///
/// The HTTP wrapper application code calls instead of a bare client. Every
/// request carries the session's bearer credential when one is held, plus a
/// fresh `x-request-id` for log correlation on the server side.
///
/// On a 401 response the wrapper forces a logout, pushes the client to the
/// login entry through the redirect sink, and signals `Unauthorized` to the
/// caller. The guard never uses this type; it belongs to the application's
/// data-fetching side.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
    sink: RedirectSinkRef,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<AuthSession>,
        sink: RedirectSinkRef,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
            sink,
        }
    }

    /// prepare
    ///
    /// Assembles one outgoing request: resolved URL, correlation id, bearer
    /// credential (when the session holds one) and optional JSON body.
    /// Split from the send so header assembly is observable in tests.
    pub fn prepare<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Request, TransportError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut builder = self
            .http
            .request(method, &url)
            .header("x-request-id", Uuid::new_v4().to_string());

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }

    /// check_unauthorized
    ///
    /// The session policy applied to every response status. A 401 clears the
    /// session exactly once for this response, fires the login redirect, and
    /// converts to the typed `Unauthorized` signal. Every other status
    /// passes through untouched — interpreting it is the caller's business.
    pub fn check_unauthorized(&self, status: StatusCode) -> Result<(), TransportError> {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("server rejected session credential; forcing logout");
            self.session.logout();
            self.sink.redirect_to_login();
            return Err(TransportError::Unauthorized);
        }
        Ok(())
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Response, TransportError> {
        let request = self.prepare(method, endpoint, body)?;
        let response = self.http.execute(request).await?;
        self.check_unauthorized(response.status())?;
        Ok(response)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Response, TransportError> {
        self.execute::<()>(Method::GET, endpoint, None).await
    }

    pub async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, TransportError> {
        self.execute(Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, TransportError> {
        self.execute(Method::PUT, endpoint, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Response, TransportError> {
        self.execute::<()>(Method::DELETE, endpoint, None).await
    }
}
