//! # API Client
//!
//! The single HTTP gateway to the backend. Every request the client makes
//! flows through [`ApiClient`], which owns the `reqwest` client, attaches
//! the bearer token, and maps failures into the [`ClientError`] taxonomy.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Request Pipeline                                  │
//! │                                                                         │
//! │  caller ──► ApiClient.get_json("/api/v1/items")                        │
//! │                │                                                        │
//! │                ├── 1. Join path onto the configured base URL           │
//! │                ├── 2. Attach Authorization: Bearer <token>             │
//! │                │      (skipped when signed out, e.g. POST /token)      │
//! │                ├── 3. Send, bounded by the configured timeout          │
//! │                │                                                        │
//! │                ▼                                                        │
//! │        ┌───────────────┐                                               │
//! │        │ Status check  │                                               │
//! │        ├───────────────┤                                               │
//! │        │ 2xx ──► deserialize body, return T                           │
//! │        │ 401 ──► session.invalidate() ──► Err(Unauthorized)           │
//! │        │ 4xx/5xx ──► Err(Api { status, detail-or-body })              │
//! │        │ no response ──► Err(Transport)                               │
//! │        └───────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The 401 branch is the global session-invalidation funnel: whichever
//! operation trips it, every observer of [`AuthSession`] sees `SignedOut`
//! and the shell returns to login.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{AuthSession, SessionUser};

/// Shape of the token endpoint's success body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

// =============================================================================
// Api Client
// =============================================================================

/// HTTP client for the backend REST API.
///
/// Cloning is cheap (the underlying `reqwest::Client` is an `Arc` pool) and
/// every clone shares the same [`AuthSession`], so a 401 seen by any clone
/// signs the whole process out.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: AuthSession,
}

impl ApiClient {
    /// Creates a client from connection settings and a session handle.
    pub fn new(config: ClientConfig, session: AuthSession) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(ApiClient {
            http,
            config,
            session,
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Signs in: `POST /token` with form-encoded credentials, then installs
    /// the returned access token into the session.
    ///
    /// This is the one request that never carries a bearer token. Bad
    /// credentials come back as `Api { status: 401, .. }` rather than
    /// [`ClientError::Unauthorized`]: there is no session to invalidate yet.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<SessionUser> {
        let url = self.config.endpoint("/token")?;
        debug!(%username, "Requesting access token");

        let response = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%username, status = status.as_u16(), "Login rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        let token: TokenResponse = response.json().await?;
        self.session.install_token(token.access_token).await
    }

    // =========================================================================
    // JSON Verbs
    // =========================================================================

    /// `GET` the given path, deserializing the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "GET");
        self.send_json(self.http.get(url)).await
    }

    /// `GET` with query parameters appended to the path.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, ?query, "GET");
        self.send_json(self.http.get(url).query(query)).await
    }

    /// `POST` a JSON body to the given path.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "POST");
        self.send_json(self.http.post(url).json(body)).await
    }

    /// `POST` a JSON body with an `Idempotency-Key` header.
    ///
    /// Used by the checkout flow so a double-submit that slips past the
    /// in-process guard is collapsible server-side.
    pub async fn post_json_idempotent<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        request_id: Uuid,
    ) -> ClientResult<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, %request_id, "POST (idempotent)");
        self.send_json(
            self.http
                .post(url)
                .header("Idempotency-Key", request_id.to_string())
                .json(body),
        )
        .await
    }

    /// `PUT` a JSON body to the given path.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "PUT");
        self.send_json(self.http.put(url).json(body)).await
    }

    // =========================================================================
    // Pipeline Internals
    // =========================================================================

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = self.authorize(request).await;
        let response = request.send().await?;
        let response = self.check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Maps non-success statuses into the error taxonomy. The 401 branch
    /// clears the session before returning, so by the time callers see
    /// `Unauthorized` every observer is already signed out.
    async fn check_status(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate().await;
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Server rejected request");
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_detail(&body),
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Extracts the backend's `detail` field from an error body, falling back
/// to the raw body when the shape is unexpected.
///
/// The backend sends `{"detail": "Item not found"}` on rejections; proxies
/// and load balancers in front of it may send anything.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(
            error_detail(r#"{"detail": "Item not found"}"#),
            "Item not found"
        );

        // Non-JSON body falls back verbatim
        assert_eq!(error_detail("502 Bad Gateway"), "502 Bad Gateway");

        // JSON without a detail field falls back verbatim
        assert_eq!(error_detail(r#"{"error": "nope"}"#), r#"{"error": "nope"}"#);

        // Empty body stays empty rather than erroring
        assert_eq!(error_detail(""), "");
    }

    #[test]
    fn test_token_response_shape() {
        let token: TokenResponse =
            serde_json::from_value(serde_json::json!({"access_token": "abc.def.ghi"})).unwrap();
        assert_eq!(token.access_token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_client_builds_offline() {
        // Constructing the client performs no I/O
        let config = ClientConfig::new("http://127.0.0.1:8000").unwrap();
        let client = ApiClient::new(config, AuthSession::new()).unwrap();
        assert!(!client.session().is_authenticated().await);
    }
}
