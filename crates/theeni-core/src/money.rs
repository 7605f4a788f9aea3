//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Weighed goods make it worse:                                           │
//! │    ₹107.00 × 0.750 kg must be exactly ₹80.25, not ₹80.24999...         │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic in memory; the backend's JSON numbers      │
//! │    are parsed into Decimal at the boundary and stay exact until        │
//! │    formatted for display                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use theeni_core::money::Money;
//!
//! let price = Money::from_major_minor(10, 99); // ₹10.99
//!
//! // Arithmetic operations
//! let total = price + Money::from_major_minor(5, 0); // ₹15.99
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::quantity::Quantity;
use crate::types::DiscountPercent;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal amount.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over Decimal
/// - **Serde**: Serializes as a plain JSON number (the backend speaks floats)
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  CatalogItem.price ──┬──► LineItem price snapshot ──► line_total       │
/// │                      │                                                  │
/// │                      └──► Displayed as "₹10.99" in UI                   │
/// │                                                                         │
/// │  Cart.subtotal ──► discount math ──► Cart.final_total ──► OrderPayload │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use theeni_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // ₹10.99
    /// assert_eq!(price.to_string(), "₹10.99");
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -₹5.50
    /// assert_eq!(refund.to_string(), "-₹5.50");
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(Decimal::new(major * 100 - minor, 2))
        } else {
            Money(Decimal::new(major * 100 + minor, 2))
        }
    }

    /// Returns the underlying exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use theeni_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the given percentage of this amount, at full precision.
    ///
    /// This is the discount building block: the discount amount on a
    /// discountable subtotal is `subtotal.percentage(discount_percent)`.
    /// No rounding happens here; display formatting rounds, stored values
    /// never do.
    ///
    /// ## Example
    /// ```rust
    /// use theeni_core::money::Money;
    /// use theeni_core::types::DiscountPercent;
    ///
    /// let subtotal = Money::from_major_minor(200, 0); // ₹200.00
    /// let ten = DiscountPercent::new(10.into()).unwrap();
    /// assert_eq!(subtotal.percentage(ten), Money::from_major_minor(20, 0));
    /// ```
    pub fn percentage(&self, pct: DiscountPercent) -> Money {
        Money(self.0 * pct.as_decimal() / Decimal::ONE_HUNDRED)
    }

    /// Rounds to whole paise (2 decimal places), half away from zero.
    ///
    /// Used at presentation and submission boundaries. Cart math stays at
    /// full precision; only the formatted/submitted figure is rounded.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and logs. UI display formatting (locale, symbol
/// position) is the shell's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let rounded = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{}₹{:.2}", sign, rounded)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a weighed quantity (line total calculation).
impl std::ops::Mul<Quantity> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Quantity) -> Self {
        Money(self.0 * qty.kilograms())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.amount(), Decimal::new(1099, 2));

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.amount(), Decimal::new(-550, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_major_minor(10, 99)), "₹10.99");
        assert_eq!(format!("{}", Money::from_major_minor(5, 0)), "₹5.00");
        assert_eq!(format!("{}", Money::from_major_minor(-5, 50)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major_minor(10, 0);
        let b = Money::from_major_minor(5, 0);

        assert_eq!(a + b, Money::from_major_minor(15, 0));
        assert_eq!(a - b, Money::from_major_minor(5, 0));

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc, Money::from_major_minor(15, 0));
    }

    #[test]
    fn test_exact_decimal_addition() {
        // The classic float failure: 0.1 + 0.2
        let a = Money::from_major_minor(0, 10);
        let b = Money::from_major_minor(0, 20);
        assert_eq!(a + b, Money::from_major_minor(0, 30));
    }

    #[test]
    fn test_percentage() {
        let subtotal = Money::from_major_minor(200, 0);
        let ten = DiscountPercent::new(Decimal::from(10)).unwrap();
        assert_eq!(subtotal.percentage(ten), Money::from_major_minor(20, 0));

        let zero = DiscountPercent::zero();
        assert!(subtotal.percentage(zero).is_zero());
    }

    #[test]
    fn test_percentage_keeps_full_precision() {
        // ₹0.50 at 15% = ₹0.075 exactly, no premature rounding
        let amount = Money::from_major_minor(0, 50);
        let pct = DiscountPercent::new(Decimal::from(15)).unwrap();
        assert_eq!(amount.percentage(pct).amount(), Decimal::new(75, 3));
        // Rounding happens only at the boundary
        assert_eq!(amount.percentage(pct).rounded().amount(), Decimal::new(8, 2));
    }

    #[test]
    fn test_multiply_by_quantity() {
        let unit_price = Money::from_major_minor(100, 0);
        let line = unit_price * Quantity::new(Decimal::new(225, 2)); // 2.25 kg
        assert_eq!(line, Money::from_major_minor(225, 0));

        // Fractional paise retained: ₹107.00 × 0.750 kg = ₹80.25
        let per_kg = Money::from_major_minor(107, 0);
        let line = per_kg * Quantity::new(Decimal::new(750, 3));
        assert_eq!(line.amount(), Decimal::new(8025, 2));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_major_minor(1, 0);
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_major_minor(-1, 0);
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let price = Money::from_major_minor(10, 99);
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json, serde_json::json!(10.99));

        let parsed: Money = serde_json::from_value(serde_json::json!(60.0)).unwrap();
        assert_eq!(parsed, Money::from_major_minor(60, 0));
    }
}
