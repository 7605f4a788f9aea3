//! # Domain Types
//!
//! Core domain types used throughout Theeni POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    Customer     │   │ DiscountPercent │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  Decimal        │       │
//! │  │  quick_code     │   │  name           │   │  0..=100        │       │
//! │  │  price (Money)  │   │  phone_number   │   │  inclusive      │       │
//! │  │  eligible flag  │   │  email          │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │      Role       │   Operator roles decoded from the access token    │
//! │  │  ─────────────  │                                                   │
//! │  │  Admin          │                                                   │
//! │  │  Cashier        │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity note: ids are backend-assigned integers, stable for the lifetime
//! of the record. The cart keys line items by `CatalogItem.id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount Percent
// =============================================================================

/// A discount percentage, constrained to 0..=100 inclusive.
///
/// ## Why a Newtype?
/// The discount invariant (never below 0, never above 100) is what keeps
/// `final_total` non-negative. Enforcing it at the type boundary means cart
/// math never has to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// Creates a discount percentage, rejecting values outside 0..=100.
    pub fn new(value: Decimal) -> CoreResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(CoreError::DiscountOutOfRange {
                value: value.to_string(),
            });
        }
        Ok(DiscountPercent(value))
    }

    /// Returns the percentage as a decimal in 0..=100.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountPercent(Decimal::ZERO)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An item from the backend catalog, available for sale by weight.
///
/// Immutable from the cart's perspective: the cart snapshots the fields it
/// needs and never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Backend-assigned identifier.
    pub id: i64,

    /// Display name shown to the operator and on receipts.
    pub name: String,

    /// Optional short code for keyboard-first lookup at the register.
    pub quick_code: Option<String>,

    /// Unit price per kilogram.
    pub price: Money,

    /// Unit label for display (the backend sends "kg" today).
    pub unit: String,

    /// Whether this item's value counts toward the discountable subtotal.
    pub is_discount_eligible: bool,

    /// Optional image for the item grid.
    pub image_url: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record, owned by the backend.
///
/// The cart holds at most one selection for attribution; only the id is
/// submitted with an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Role
// =============================================================================

/// Operator role, decoded from the access token's claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: catalog maintenance, reports, and the register.
    Admin,
    /// Register access only.
    Cashier,
}

impl Role {
    /// Checks if this role may use the admin surfaces (catalog CRUD, reports).
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_percent_accepts_bounds() {
        assert!(DiscountPercent::new(Decimal::ZERO).is_ok());
        assert!(DiscountPercent::new(Decimal::ONE_HUNDRED).is_ok());
        assert!(DiscountPercent::new(Decimal::new(125, 1)).is_ok()); // 12.5
    }

    #[test]
    fn test_discount_percent_rejects_out_of_range() {
        assert!(matches!(
            DiscountPercent::new(Decimal::from(-5)),
            Err(CoreError::DiscountOutOfRange { .. })
        ));
        assert!(matches!(
            DiscountPercent::new(Decimal::from(150)),
            Err(CoreError::DiscountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_discount_percent_default_is_zero() {
        assert!(DiscountPercent::default().is_zero());
        assert_eq!(DiscountPercent::default(), DiscountPercent::zero());
    }

    #[test]
    fn test_catalog_item_from_backend_json() {
        // Shape the backend actually returns for GET /api/v1/items
        let json = serde_json::json!({
            "id": 3,
            "name": "Kaju Katli",
            "quick_code": "KK",
            "price": 80.0,
            "unit": "kg",
            "is_discount_eligible": true,
            "image_url": null
        });

        let item: CatalogItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.id, 3);
        assert_eq!(item.quick_code.as_deref(), Some("KK"));
        assert_eq!(item.price, Money::from_major_minor(80, 0));
        assert!(item.is_discount_eligible);
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_customer_from_backend_json() {
        let json = serde_json::json!({
            "id": 12,
            "name": "Asha Rao",
            "phone_number": "9876543210",
            "email": null
        });

        let customer: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(customer.id, 12);
        assert_eq!(customer.phone_number.as_deref(), Some("9876543210"));
        assert!(customer.email.is_none());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
        assert!(!role.is_admin());
        assert!(Role::Admin.is_admin());
    }
}
