//! # Client Error Types
//!
//! Error types for backend API calls and client-side state operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │   API / Auth    │  │       Local             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Transport      │  │  Api{status}    │  │  Validation             │ │
//! │  │  (reqwest)      │  │  Unauthorized   │  │  Core (EmptyCart, ...)  │ │
//! │  │                 │  │  InvalidToken   │  │  SubmissionInProgress   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Policy: every failure leaves local state unchanged. Nothing retries   │
//! │  automatically; the operator re-triggers the action. A 401 anywhere    │
//! │  clears the session globally.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use theeni_core::{CoreError, ValidationError};

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering all API and state failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never completed: connection refused, DNS failure,
    /// timeout, or a broken response body.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // =========================================================================
    // API Errors
    // =========================================================================
    /// The server answered with a non-success status (4xx/5xx).
    /// `message` carries the backend's `detail` field when present,
    /// otherwise the raw body.
    #[error("Server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered 401. The session has already been cleared by
    /// the time callers see this; the operator must sign in again.
    #[error("Session expired or invalid, sign in again")]
    Unauthorized,

    /// The access token could not be decoded.
    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The configured API base URL does not parse.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Input failed validation before any request went out.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A domain rule was violated (e.g. checkout on an empty cart).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A second checkout was attempted while one is already in flight.
    /// The first submission continues; this attempt did nothing.
    #[error("An order submission is already in flight")]
    SubmissionInProgress,
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if the request never reached a server verdict
    /// (network trouble rather than a rejection).
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Returns true if this error means the operator must re-authenticate.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized | ClientError::InvalidToken(_)
        )
    }

    /// Returns true if this error was raised locally, before any request.
    pub fn is_local_error(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::Core(_)
                | ClientError::SubmissionInProgress
        )
    }

    /// The HTTP status behind this error, if a server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        let api = ClientError::Api {
            status: 422,
            message: "price must be non-negative".into(),
        };
        assert!(!api.is_transport_error());
        assert!(!api.is_auth_error());
        assert_eq!(api.status(), Some(422));

        assert!(ClientError::Unauthorized.is_auth_error());
        assert_eq!(ClientError::Unauthorized.status(), Some(401));

        assert!(ClientError::SubmissionInProgress.is_local_error());
        let validation = ClientError::Validation(ValidationError::Required {
            field: "name".into(),
        });
        assert!(validation.is_local_error());
        assert_eq!(validation.status(), None);
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 500,
            message: "internal error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Server rejected request (500): internal error"
        );
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: ClientError = CoreError::EmptyCart.into();
        assert!(err.is_local_error());
        assert_eq!(err.to_string(), "Cart is empty, nothing to submit");
    }
}
