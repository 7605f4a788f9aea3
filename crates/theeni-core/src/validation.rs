//! # Validation Module
//!
//! Input validation utilities for Theeni POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI shell                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Free-form input parsing (discount, weight)                        │
//! │  └── Business rule validation before any request goes out              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend API                                                  │
//! │  ├── Authoritative constraints                                         │
//! │  └── Rejections surface as API errors, not validation errors           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use theeni_core::validation::{parse_discount_input, validate_customer_name};
//!
//! let pct = parse_discount_input("12.5").unwrap();
//! let name = validate_customer_name("  Asha Rao ").unwrap();
//! assert_eq!(name, "Asha Rao");
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::quantity::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Discount Input
// =============================================================================

/// Parses the free-form discount field into a percentage value.
///
/// ## Rules
/// - Empty input means no discount (0)
/// - Non-numeric input is a format error
/// - Values outside 0..=100 are a range error
///
/// This is the form-feedback path. [`Cart::apply_discount`] separately
/// ignores out-of-range values without error, so a caller that skips this
/// helper still cannot corrupt the cart.
///
/// [`Cart::apply_discount`]: crate::cart::Cart::apply_discount
///
/// ## Example
/// ```rust
/// use theeni_core::validation::parse_discount_input;
///
/// assert!(parse_discount_input("10").is_ok());
/// assert!(parse_discount_input("12.5").is_ok());
/// assert!(parse_discount_input("ten percent").is_err());
/// assert!(parse_discount_input("150").is_err());
/// ```
pub fn parse_discount_input(input: &str) -> ValidationResult<Decimal> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value: Decimal = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "discount".to_string(),
        reason: "must be a number".to_string(),
    })?;

    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(value)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name for the new-customer form.
///
/// ## Rules
/// - Must not be empty (the only required field on the form)
/// - Maximum 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a catalog item name for the admin item form.
///
/// Same rules as customer names: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional quick code for the admin item form.
///
/// ## Rules
/// - Empty input means no quick code (the field is nullable)
/// - Maximum 20 characters
/// - Only letters, numbers, hyphens, and underscores
pub fn validate_quick_code(code: &str) -> ValidationResult<Option<String>> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(None);
    }

    if code.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "quick_code".to_string(),
            max: 20,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "quick_code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(Some(code.to_string()))
}

/// Validates a customer search query.
///
/// ## Rules
/// - Can be empty (the caller skips the request entirely)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a weighed quantity from free-form entry.
///
/// ## Rules
/// - Must be positive (> 0); the cart never holds a non-positive line
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog item price from the admin form.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
pub fn validate_item_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discount_input() {
        assert_eq!(parse_discount_input("10").unwrap(), Decimal::from(10));
        assert_eq!(parse_discount_input(" 12.5 ").unwrap(), Decimal::new(125, 1));
        assert_eq!(parse_discount_input("0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_discount_input("100").unwrap(), Decimal::ONE_HUNDRED);

        // Empty field means no discount
        assert_eq!(parse_discount_input("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_discount_input("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_discount_input_non_numeric() {
        assert!(matches!(
            parse_discount_input("ten percent"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_discount_input("10%"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_discount_input_out_of_range() {
        assert!(matches!(
            parse_discount_input("-5"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_discount_input("150"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("  Asha Rao ").unwrap(), "Asha Rao");
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quick_code() {
        assert_eq!(validate_quick_code("KK").unwrap(), Some("KK".to_string()));
        assert_eq!(validate_quick_code("item_1").unwrap(), Some("item_1".to_string()));
        assert_eq!(validate_quick_code("").unwrap(), None);
        assert_eq!(validate_quick_code("   ").unwrap(), None);

        assert!(validate_quick_code("has space").is_err());
        assert!(validate_quick_code(&"A".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  asha ").unwrap(), "asha");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::STEP).is_ok());
        assert!(validate_quantity(Quantity::zero()).is_err());
        assert!(validate_quantity(Quantity::zero().stepped_down()).is_err());
    }

    #[test]
    fn test_validate_item_price() {
        assert!(validate_item_price(Decimal::from(80)).is_ok());
        assert!(validate_item_price(Decimal::ZERO).is_ok());
        assert!(validate_item_price(Decimal::from(-1)).is_err());
    }
}
