//! # Cart Module
//!
//! The in-progress order: line items, discount, customer selection, and the
//! pricing derivations over them. This is the authoritative model the whole
//! register works against.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Register Action          Cart Operation          State Change          │
//! │  ───────────────          ──────────────          ────────────          │
//! │                                                                         │
//! │  Pick item + weight ─────► upsert_item() ───────► merge or append      │
//! │                                                                         │
//! │  Tap [+] on a line ──────► increment_item() ────► qty += 0.25 kg       │
//! │                                                                         │
//! │  Tap [-] on a line ──────► decrement_item() ────► qty -= 0.25 kg,      │
//! │                                                    remove at ≤ 0        │
//! │                                                                         │
//! │  Tap [x] on a line ──────► remove_item() ───────► line removed         │
//! │                                                                         │
//! │  Enter discount % ───────► apply_discount() ────► 0..=100 or ignored   │
//! │                                                                         │
//! │  Pick customer ──────────► set_customer() ──────► selection replaced   │
//! │                                                                         │
//! │  Checkout success ───────► clear() ─────────────► empty, 0%, no cust.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing
//! Four pure derivations, all safe on an empty cart:
//! ```text
//! subtotal              = Σ price × quantity              (all lines)
//! discountable_subtotal = Σ price × quantity              (eligible lines)
//! discount_amount       = discountable_subtotal × pct/100
//! final_total           = subtotal − discount_amount
//! ```
//! Because the discount applies only to eligible lines and pct ≤ 100,
//! `final_total` can never go negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{CatalogItem, Customer, DiscountPercent};

// =============================================================================
// Line Item
// =============================================================================

/// One line of the in-progress order.
///
/// ## Design Notes
/// - `item_id`: reference back to the catalog record
/// - The remaining fields are a frozen snapshot taken when the line was
///   created. If the catalog changes mid-order, this cart keeps displaying
///   and charging what the operator saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog item id.
    pub item_id: i64,

    /// Name at the time of adding (frozen).
    pub name: String,

    /// Unit price per kilogram at the time of adding (frozen).
    pub price: Money,

    /// Unit label for display (frozen).
    pub unit: String,

    /// Whether the line counts toward the discountable subtotal (frozen).
    pub is_discount_eligible: bool,

    /// Weighed quantity on this line. Always > 0; a line that would drop
    /// to zero or below is removed from the cart instead.
    pub quantity: Quantity,
}

impl LineItem {
    /// Creates a line item by snapshotting a catalog item.
    pub fn from_item(item: &CatalogItem, quantity: Quantity) -> Self {
        LineItem {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            unit: item.unit.clone(),
            is_discount_eligible: item.is_discount_eligible,
            quantity,
        }
    }

    /// Line total: unit price × quantity, at full precision.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order being assembled at the register.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item merges quantities)
/// - Every line's quantity is > 0 (operations that would leave ≤ 0 remove
///   the line instead)
/// - `discount` is always within 0..=100 (out-of-range input is ignored)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    pub items: Vec<LineItem>,

    /// Whole-order discount percentage, applied to eligible lines only.
    pub discount: DiscountPercent,

    /// Selected customer for attribution, if any.
    pub customer: Option<Customer>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a catalog item to the cart or merges into an existing line.
    ///
    /// ## Behavior
    /// - Item already in cart: its quantity grows by `quantity`
    /// - Item not in cart: a new line is appended with `quantity`
    ///
    /// Callers pass `quantity > 0`; the register's weight entry enforces
    /// that before this is reached, so no error path exists here. A line
    /// can still never end up non-positive: the decrement path removes it
    /// first.
    pub fn upsert_item(&mut self, item: &CatalogItem, quantity: Quantity) {
        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += quantity;
            return;
        }
        self.items.push(LineItem::from_item(item, quantity));
    }

    /// Increases a line's quantity by one step (0.25 kg).
    ///
    /// No-op if no line with `item_id` exists.
    pub fn increment_item(&mut self, item_id: i64) {
        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = line.quantity.stepped_up();
        }
    }

    /// Decreases a line's quantity by one step (0.25 kg).
    ///
    /// If the step would leave the quantity at zero or below, the line is
    /// removed entirely. No-op if no line with `item_id` exists.
    pub fn decrement_item(&mut self, item_id: i64) {
        if let Some(pos) = self.items.iter().position(|l| l.item_id == item_id) {
            let stepped = self.items[pos].quantity.stepped_down();
            if stepped.is_positive() {
                self.items[pos].quantity = stepped;
            } else {
                self.items.remove(pos);
            }
        }
    }

    /// Removes the line with the given item id, if present.
    pub fn remove_item(&mut self, item_id: i64) {
        self.items.retain(|l| l.item_id != item_id);
    }

    /// Sets the whole-order discount percentage.
    ///
    /// Values outside 0..=100 are ignored without touching the current
    /// discount. Operators see the field simply not take the bad value;
    /// form-level feedback is the validation layer's job
    /// ([`parse_discount_input`](crate::validation::parse_discount_input)).
    pub fn apply_discount(&mut self, percentage: Decimal) {
        if let Ok(pct) = DiscountPercent::new(percentage) {
            self.discount = pct;
        }
    }

    /// Sets or clears the selected customer.
    pub fn set_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    /// Resets to a fresh order: no lines, zero discount, no customer.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = DiscountPercent::zero();
        self.customer = None;
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Sum of line totals for discount-eligible lines only.
    pub fn discountable_subtotal(&self) -> Money {
        self.items
            .iter()
            .filter(|line| line.is_discount_eligible)
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Discount amount: the discount percentage of the discountable
    /// subtotal. Never computed against the full subtotal.
    pub fn discount_amount(&self) -> Money {
        self.discountable_subtotal().percentage(self.discount)
    }

    /// Amount due: subtotal minus discount amount.
    pub fn final_total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the line for an item id, if present.
    pub fn line_item(&self, item_id: i64) -> Option<&LineItem> {
        self.items.iter().find(|l| l.item_id == item_id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total weighed quantity across all lines.
    pub fn total_quantity(&self) -> Quantity {
        self.items
            .iter()
            .fold(Quantity::zero(), |acc, line| acc + line.quantity)
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals summary for display surfaces (cart panel, checkout dialog).
///
/// Taken from a cart in one go so every figure comes from the same state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: Quantity,
    pub subtotal: Money,
    pub discountable_subtotal: Money,
    pub discount_percent: DiscountPercent,
    pub discount_amount: Money,
    pub final_total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            discountable_subtotal: cart.discountable_subtotal(),
            discount_percent: cart.discount,
            discount_amount: cart.discount_amount(),
            final_total: cart.final_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
