//! # Quantity Module
//!
//! Weighed quantities in kilograms. Theeni sells loose goods by weight, so
//! quantities are fractional decimals, not unit counts. The register adjusts
//! quantities in fixed steps of 0.25 kg; display formatting is three decimal
//! places ("0.250 kg"). Like [`Money`](crate::money::Money), the value stays
//! exact in memory and crosses the wire as a plain JSON number.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Quantity Type
// =============================================================================

/// A weighed quantity in kilograms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Quantity(Decimal);

impl Quantity {
    /// The fixed adjustment step for the +/- register keys: 0.25 kg.
    ///
    /// This is the minimum meaningful increment for weighed goods; every
    /// increment/decrement moves by exactly this much.
    pub const STEP: Quantity = Quantity(Decimal::from_parts(25, 0, 0, false, 2));

    /// Preset quantities offered by the register for quick entry.
    pub const QUICK_PICKS: [Quantity; 4] = [
        Quantity(Decimal::from_parts(25, 0, 0, false, 2)), // 0.25 kg
        Quantity(Decimal::from_parts(5, 0, 0, false, 1)),  // 0.5 kg
        Quantity(Decimal::from_parts(1, 0, 0, false, 0)),  // 1 kg
        Quantity(Decimal::from_parts(2, 0, 0, false, 0)),  // 2 kg
    ];

    /// Creates a Quantity from an exact decimal kilogram amount.
    #[inline]
    pub const fn new(kilograms: Decimal) -> Self {
        Quantity(kilograms)
    }

    /// Returns the underlying kilogram amount.
    #[inline]
    pub const fn kilograms(&self) -> Decimal {
        self.0
    }

    /// Returns zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(Decimal::ZERO)
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the quantity is greater than zero.
    ///
    /// Cart line items must always satisfy this; a line that would drop to
    /// zero or below is removed instead.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns this quantity increased by one step (0.25 kg).
    #[inline]
    pub fn stepped_up(&self) -> Quantity {
        *self + Self::STEP
    }

    /// Returns this quantity decreased by one step (0.25 kg).
    ///
    /// May yield zero or a negative value; callers decide what a
    /// non-positive result means (the cart removes the line).
    #[inline]
    pub fn stepped_down(&self) -> Quantity {
        *self - Self::STEP
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows three decimal places, the scale weighings use.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.3}", rounded)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_value() {
        assert_eq!(Quantity::STEP.kilograms(), Decimal::new(25, 2));
    }

    #[test]
    fn test_stepping() {
        let two = Quantity::new(Decimal::from(2));
        assert_eq!(two.stepped_up().kilograms(), Decimal::new(225, 2));

        let quarter = Quantity::new(Decimal::new(25, 2));
        let down = quarter.stepped_down();
        assert!(down.is_zero());
        assert!(!down.is_positive());
    }

    #[test]
    fn test_stepping_below_zero() {
        let down = Quantity::zero().stepped_down();
        assert!(!down.is_positive());
        assert_eq!(down.kilograms(), Decimal::new(-25, 2));
    }

    #[test]
    fn test_display_three_decimals() {
        assert_eq!(Quantity::new(Decimal::new(25, 2)).to_string(), "0.250");
        assert_eq!(Quantity::new(Decimal::from(2)).to_string(), "2.000");
        assert_eq!(Quantity::new(Decimal::new(225, 2)).to_string(), "2.250");
    }

    #[test]
    fn test_quick_picks_are_step_aligned() {
        for pick in Quantity::QUICK_PICKS {
            assert!(pick.is_positive());
        }
        assert_eq!(Quantity::QUICK_PICKS[0], Quantity::STEP);
        assert_eq!(Quantity::QUICK_PICKS[2].kilograms(), Decimal::ONE);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let qty = Quantity::new(Decimal::new(225, 2));
        let json = serde_json::to_value(qty).unwrap();
        assert_eq!(json, serde_json::json!(2.25));

        let parsed: Quantity = serde_json::from_value(serde_json::json!(0.25)).unwrap();
        assert_eq!(parsed, Quantity::STEP);
    }
}
