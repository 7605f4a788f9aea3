//! # Cart Store
//!
//! The single authoritative, observable store for the in-progress order.
//!
//! ## Why a Store on Top of `Cart`?
//! The [`Cart`] value in theeni-core knows the rules (upsert merging, the
//! 0.25 kg step, silent discount rejection) but nothing about sharing.
//! This wrapper makes one cart visible to every surface of the register:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Store Data Flow                              │
//! │                                                                         │
//! │  Register action          CartStore                Observers            │
//! │  ───────────────          ─────────                ─────────            │
//! │                                                                         │
//! │  upsert / +/- / remove ──► lock ──► mutate Cart ──► publish snapshot   │
//! │  discount / customer       │                         │                  │
//! │  clear                     ▼                         ▼                  │
//! │                        Arc<Mutex<Cart>>      watch::Receiver            │
//! │                                              ├── cart panel             │
//! │                                              ├── checkout dialog        │
//! │                                              └── totals footer          │
//! │                                                                         │
//! │  The snapshot is published INSIDE the same call that mutates, so no    │
//! │  observer ever reads totals from one state and lines from another.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cart sits behind `Arc<Mutex<..>>`; every mutation is a short
//! critical section (no I/O under the lock, ever). Snapshots go out over a
//! `tokio::sync::watch` channel, which always holds the latest value, so a
//! subscriber that lags simply skips intermediate states and lands on the
//! current one.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use theeni_core::{Cart, CartTotals, CatalogItem, Customer, LineItem, Quantity};

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Immutable view of the cart published to observers after every mutation.
///
/// Lines, customer, and totals are captured under one lock acquisition, so
/// the figures are always mutually consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Lines in insertion order.
    pub items: Vec<LineItem>,

    /// Selected customer, if any.
    pub customer: Option<Customer>,

    /// All derived figures, taken from the same state as `items`.
    pub totals: CartTotals,
}

impl CartSnapshot {
    fn capture(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            customer: cart.customer.clone(),
            totals: CartTotals::from(cart),
        }
    }

    /// Checks if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Shared, observable cart state.
///
/// Cloning hands out another handle to the same cart; the store is an
/// explicit object the application root creates and injects, not an
/// ambient singleton.
#[derive(Clone)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
    snapshot_tx: Arc<watch::Sender<CartSnapshot>>,
}

impl CartStore {
    /// Creates a store holding a fresh empty cart.
    pub fn new() -> Self {
        let cart = Cart::new();
        let (snapshot_tx, _) = watch::channel(CartSnapshot::capture(&cart));
        CartStore {
            cart: Arc::new(Mutex::new(cart)),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================
    // Each of these locks, applies the corresponding Cart operation, and
    // publishes the resulting snapshot before returning.

    /// Adds a catalog item or merges into its existing line.
    pub fn upsert_item(&self, item: &CatalogItem, quantity: Quantity) {
        debug!(item_id = item.id, %quantity, "Cart upsert");
        self.mutate(|cart| cart.upsert_item(item, quantity));
    }

    /// Increases a line's quantity by one 0.25 kg step. No-op on a missing id.
    pub fn increment_item(&self, item_id: i64) {
        debug!(item_id, "Cart increment");
        self.mutate(|cart| cart.increment_item(item_id));
    }

    /// Decreases a line's quantity by one step, removing the line when it
    /// would drop to zero or below. No-op on a missing id.
    pub fn decrement_item(&self, item_id: i64) {
        debug!(item_id, "Cart decrement");
        self.mutate(|cart| cart.decrement_item(item_id));
    }

    /// Removes the line with the given item id, if present.
    pub fn remove_item(&self, item_id: i64) {
        debug!(item_id, "Cart remove");
        self.mutate(|cart| cart.remove_item(item_id));
    }

    /// Sets the whole-order discount percentage. Out-of-range values are
    /// ignored without touching the current discount.
    pub fn apply_discount(&self, percentage: Decimal) {
        debug!(%percentage, "Cart discount");
        self.mutate(|cart| cart.apply_discount(percentage));
    }

    /// Sets or clears the selected customer.
    pub fn set_customer(&self, customer: Option<Customer>) {
        debug!(customer_id = ?customer.as_ref().map(|c| c.id), "Cart customer");
        self.mutate(|cart| cart.set_customer(customer));
    }

    /// Resets to a fresh order: no lines, zero discount, no customer.
    ///
    /// Called by the checkout flow after a confirmed submission, never
    /// before.
    pub fn clear(&self) {
        debug!("Cart cleared");
        self.mutate(Cart::clear);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current snapshot, without subscribing.
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to cart changes. The receiver immediately holds the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Runs a closure against the live cart under the lock.
    ///
    /// For reads that need the full `Cart` API rather than the snapshot.
    /// The closure must not block; the lock is held for its duration.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        // Cart operations never panic, so a poisoned lock still holds a
        // consistent cart; recover the guard.
        let guard = self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn mutate(&self, f: impl FnOnce(&mut Cart)) {
        let mut guard = self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
        let snapshot = CartSnapshot::capture(&guard);
        // Published while still holding the lock: observers can never see a
        // snapshot older than the cart state a later lock holder reads.
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use theeni_core::Money;

    fn test_item(id: i64, price_major: i64, eligible: bool) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("Item {}", id),
            quick_code: None,
            price: Money::from_major_minor(price_major, 0),
            unit: "kg".to_string(),
            is_discount_eligible: eligible,
            image_url: None,
        }
    }

    fn kg(s: &str) -> Quantity {
        Quantity::new(s.parse().unwrap())
    }

    #[test]
    fn test_snapshot_updates_synchronously() {
        let store = CartStore::new();
        assert!(store.snapshot().is_empty());

        store.upsert_item(&test_item(1, 100, true), kg("2"));

        // Visible immediately after the call returns, no await needed
        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.totals.subtotal, Money::from_major_minor(200, 0));
    }

    #[tokio::test]
    async fn test_subscriber_sees_every_settled_state() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_empty());

        store.upsert_item(&test_item(1, 100, true), kg("2"));
        store.apply_discount(Decimal::from(10));

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        // watch keeps only the latest value; the subscriber lands on the
        // post-discount state with all figures from the same cart
        assert_eq!(snapshot.totals.discount_amount, Money::from_major_minor(20, 0));
        assert_eq!(snapshot.totals.final_total, Money::from_major_minor(180, 0));
        assert_eq!(
            snapshot.totals.final_total,
            snapshot.totals.subtotal - snapshot.totals.discount_amount
        );
    }

    #[test]
    fn test_snapshot_totals_match_lines() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("2"));
        store.upsert_item(&test_item(2, 50, false), kg("1"));
        store.apply_discount(Decimal::from(10));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.totals.subtotal, Money::from_major_minor(250, 0));
        assert_eq!(
            snapshot.totals.discountable_subtotal,
            Money::from_major_minor(200, 0)
        );
        assert_eq!(snapshot.totals.discount_amount, Money::from_major_minor(20, 0));
        assert_eq!(snapshot.totals.final_total, Money::from_major_minor(230, 0));
    }

    #[test]
    fn test_decrement_to_removal_through_store() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("0.5"));

        store.decrement_item(1);
        assert_eq!(store.snapshot().items[0].quantity, kg("0.25"));

        store.decrement_item(1);
        assert!(store.snapshot().is_empty());
        assert!(store.snapshot().totals.final_total.is_zero());
    }

    #[test]
    fn test_out_of_range_discount_leaves_snapshot_unchanged() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("1"));
        store.apply_discount(Decimal::from(10));
        let before = store.snapshot();

        store.apply_discount(Decimal::from(150));
        store.apply_discount(Decimal::from(-5));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_clear_resets_snapshot() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("2"));
        store.apply_discount(Decimal::from(10));
        store.set_customer(Some(Customer {
            id: 12,
            name: "Asha Rao".to_string(),
            phone_number: None,
            email: None,
        }));

        store.clear();

        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.customer.is_none());
        assert!(snapshot.totals.discount_percent.is_zero());
        assert!(snapshot.totals.final_total.is_zero());
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::new();
        let handle = store.clone();

        handle.upsert_item(&test_item(1, 100, true), kg("1"));

        assert_eq!(store.snapshot().items.len(), 1);
        assert_eq!(store.with_cart(|cart| cart.item_count()), 1);
    }
}
