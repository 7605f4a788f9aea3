//! # Error Types
//!
//! Domain-specific error types for theeni-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  theeni-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  theeni-client errors (separate crate)                                 │
//! │  └── ClientError      - Transport, API status, session failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → UI shell            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted on an empty cart.
    ///
    /// ## When This Occurs
    /// - The UI normally disables checkout for an empty cart, so reaching
    ///   this error means a caller bypassed that guard
    /// - The cart was cleared (e.g. by a concurrent successful submission)
    ///   between the operator's click and the submission build
    #[error("Cart is empty, nothing to submit")]
    EmptyCart,

    /// Discount percentage outside the allowed 0-100 range.
    ///
    /// Only raised by the fallible constructor paths (form input parsing).
    /// `Cart::apply_discount` rejects out-of-range values silently instead,
    /// matching the behavior operators see at the register.
    #[error("Discount must be between 0 and 100, got {value}")]
    DiscountOutOfRange { value: String },

    /// Line item quantity would be zero or negative.
    #[error("Quantity must be positive, got {value}")]
    QuantityNotPositive { value: String },

    /// Catalog item carries a negative unit price.
    #[error("Price for {name} cannot be negative")]
    NegativePrice { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric discount input).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
