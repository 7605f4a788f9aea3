//! # Auth Session
//!
//! Holds the operator's access token and identity for the lifetime of the
//! process, with optional disk caching so a restart resumes the session.
//!
//! ## Authentication Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  ┌────────────────┐      ┌─────────────────┐      ┌─────────────────┐  │
//! │  │  UI shell      │      │  AuthSession    │      │  Backend        │  │
//! │  └───────┬────────┘      └────────┬────────┘      └────────┬────────┘  │
//! │          │                        │                        │           │
//! │          │ 1. login(user, pass) ──────────────────────────►│           │
//! │          │                        │   POST /token          │           │
//! │          │                        │◄── {access_token} ─────│           │
//! │          │ 2. install_token ─────►│                        │           │
//! │          │    (decode sub/role,   │                        │           │
//! │          │     publish SignedIn,  │                        │           │
//! │          │     cache to disk)     │                        │           │
//! │          │                        │                        │           │
//! │          │ 3. any API call ──────►│ bearer_token() ───────►│           │
//! │          │                        │                        │           │
//! │          │   [Backend answers 401 on any request]          │           │
//! │          │                        │                        │           │
//! │          │ 4. invalidate() ──────►│ publish SignedOut,     │           │
//! │          │    (from ApiClient)    │ drop cache             │           │
//! │          │                        │                        │           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Token Trust Model
//! The client has no signing key, so the JWT is decoded with signature
//! validation disabled. The decoded subject and role drive UI affordances
//! only (which screens to show); the backend re-authorizes every request.
//! Expiry is likewise not checked locally: an expired token simply earns a
//! 401 on its first use, which clears the session.

use std::path::PathBuf;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use theeni_core::Role;

use crate::error::ClientResult;

/// Identity decoded from the access token's claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Token subject: the operator's username.
    pub sub: String,
    /// Operator role, drives which surfaces the shell offers.
    pub role: Role,
}

/// Claims the backend puts in its access tokens. Extra claims (exp, iat)
/// are ignored on decode.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
}

/// Observable session state, published on every transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No valid token held. The shell shows the login screen.
    #[default]
    SignedOut,
    /// A token is installed and its identity decoded.
    SignedIn(SessionUser),
}

impl SessionState {
    /// Checks if a token is currently installed.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }
}

/// On-disk session cache shape (`session.json` in the app config dir).
#[derive(Debug, Serialize, Deserialize)]
struct CachedSession {
    access_token: String,
}

/// Stored token plus its decoded identity.
#[derive(Debug, Clone)]
struct ActiveSession {
    access_token: String,
    user: SessionUser,
}

// =============================================================================
// Auth Session
// =============================================================================

/// Shared session manager.
///
/// ## Thread Safety
/// Cloning hands out another handle to the same session. The token lives
/// behind `Arc<RwLock<..>>`; state transitions are published through a
/// watch channel so any number of observers see them.
#[derive(Clone)]
pub struct AuthSession {
    session: Arc<RwLock<Option<ActiveSession>>>,
    state_tx: Arc<watch::Sender<SessionState>>,
    /// Where the token is cached across restarts. None disables caching.
    cache_path: Option<PathBuf>,
}

impl AuthSession {
    /// Creates an in-memory session (no disk cache). Signed out initially.
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(SessionState::SignedOut);
        AuthSession {
            session: Arc::new(RwLock::new(None)),
            state_tx: Arc::new(state_tx),
            cache_path: None,
        }
    }

    /// Creates a session that caches its token under the platform config
    /// directory. Falls back to in-memory when no home directory exists.
    pub fn with_persistence() -> Self {
        let mut session = Self::new();
        session.cache_path = default_cache_path();
        session
    }

    /// Creates a session caching to an explicit file path.
    pub fn with_cache_path(path: PathBuf) -> Self {
        let mut session = Self::new();
        session.cache_path = Some(path);
        session
    }

    /// Installs an access token: decodes its identity, publishes
    /// `SignedIn`, and caches the token to disk.
    ///
    /// Called by [`ApiClient::login`](crate::http::ApiClient::login) after
    /// the token endpoint succeeds, and by [`restore`](Self::restore) at
    /// startup.
    pub async fn install_token(&self, access_token: String) -> ClientResult<SessionUser> {
        let user = decode_user(&access_token)?;

        {
            let mut guard = self.session.write().await;
            *guard = Some(ActiveSession {
                access_token: access_token.clone(),
                user: user.clone(),
            });
        }

        self.state_tx
            .send_replace(SessionState::SignedIn(user.clone()));
        info!(sub = %user.sub, role = ?user.role, "Signed in");

        self.write_cache(&access_token);
        Ok(user)
    }

    /// Restores a cached session from disk, if one exists and decodes.
    ///
    /// Missing or unreadable cache files mean signed out, never an error.
    /// An expired cached token still restores; its first use earns a 401
    /// which clears the session again.
    pub async fn restore(&self) -> Option<SessionUser> {
        let path = self.cache_path.as_ref()?;
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(?err, "No cached session to restore");
                return None;
            }
        };

        let cached: CachedSession = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(err) => {
                warn!(?err, "Cached session is corrupt, ignoring");
                return None;
            }
        };

        match self.install_token(cached.access_token).await {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(?err, "Cached token no longer decodes, ignoring");
                None
            }
        }
    }

    /// Signs out: clears the token, publishes `SignedOut`, removes the
    /// disk cache.
    pub async fn sign_out(&self) {
        self.clear().await;
        info!("Signed out");
    }

    /// Server-side invalidation path: a 401 arrived on some request.
    ///
    /// Identical to [`sign_out`](Self::sign_out) except for the log line;
    /// every observer sees `SignedOut` and the shell returns to login
    /// regardless of which call triggered it.
    pub async fn invalidate(&self) {
        self.clear().await;
        warn!("Session invalidated by server (401)");
    }

    async fn clear(&self) {
        {
            let mut guard = self.session.write().await;
            *guard = None;
        }
        self.state_tx.send_replace(SessionState::SignedOut);
        self.drop_cache();
    }

    /// The raw token for the `Authorization: Bearer` header, if signed in.
    pub async fn bearer_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// The decoded identity, if signed in.
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Checks if a token is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Current observable state without subscribing.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Subscribes to session transitions. The receiver immediately holds
    /// the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn write_cache(&self, access_token: &str) {
        let Some(path) = self.cache_path.as_ref() else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(?err, "Could not create session cache directory");
                return;
            }
        }

        let cached = CachedSession {
            access_token: access_token.to_string(),
        };
        match serde_json::to_string(&cached) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    warn!(?err, "Could not cache session to disk");
                }
            }
            Err(err) => warn!(?err, "Could not serialize session cache"),
        }
    }

    fn drop_cache(&self) {
        let Some(path) = self.cache_path.as_ref() else {
            return;
        };
        if let Err(err) = std::fs::remove_file(path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(?err, "Could not remove session cache");
            }
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Decodes the identity claims without verifying the signature.
///
/// The signature check is the backend's job; the client holds no key and
/// treats the claims as display hints.
fn decode_user(access_token: &str) -> ClientResult<SessionUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = jsonwebtoken::decode::<Claims>(
        access_token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )?;

    Ok(SessionUser {
        sub: data.claims.sub,
        role: data.claims.role,
    })
}

/// Platform config location for the session cache
/// (e.g. `~/.config/theeni/session.json` on Linux).
fn default_cache_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "theeni", "theeni")?;
    Some(dirs.config_dir().join("session.json"))
}

// =============================================================================
// Unit Tests
// =============================================================================
