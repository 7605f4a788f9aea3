//! # Checkout Flow
//!
//! Turns the current cart snapshot into an order submission and manages the
//! one-at-a-time submission lifecycle.
//!
//! ## Submission Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout State Machine                             │
//! │                                                                         │
//! │              submit()                                                   │
//! │  ┌────────┐  cart non-empty,   ┌────────────┐                          │
//! │  │  Idle  │ ─────────────────► │ Submitting │                          │
//! │  └────────┘  no flight active  └─────┬──────┘                          │
//! │      ▲                               │                                  │
//! │      │         POST /api/v1/orders   │                                  │
//! │      │         Idempotency-Key: <request id>                           │
//! │      │                               │                                  │
//! │      │    ┌──────────────────────────┴───────────────────┐             │
//! │      │    │                                              │             │
//! │      │  success                                       failure          │
//! │      │    │  • store.clear()                             │             │
//! │      │    │  • request id discarded                      │  • cart     │
//! │      │    │  • confirmation returned                     │    untouched│
//! │      │    │                                              │  • request  │
//! │      └────┴──────────────────────────────────────────────┘    id kept  │
//! │                                                                         │
//! │  submit() while Submitting ──► Err(SubmissionInProgress), first        │
//! │                                flight unaffected                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Idempotency
//! A request id (`uuid` v4) is generated when a submission sequence begins
//! and sent as the `Idempotency-Key` header. The id survives failures, so
//! an operator retry of the same cart carries the same key and the backend
//! can collapse duplicates; only a confirmed success discards it. The
//! in-process submitting guard remains the first line of defense.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use theeni_core::{CoreError, DiscountPercent, Money, Quantity};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::store::{CartSnapshot, CartStore};

/// Order submission endpoint.
const ORDERS_PATH: &str = "/api/v1/orders";

// =============================================================================
// Payload
// =============================================================================

/// One line of the submission body: `{id, quantity, price}` with the price
/// snapshot the operator saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog item id.
    pub id: i64,
    /// Weighed quantity in kilograms.
    pub quantity: Quantity,
    /// Unit price frozen when the line was added to the cart.
    pub price: Money,
}

/// The one-shot body for `POST /api/v1/orders`.
///
/// Built from a [`CartSnapshot`] immediately before submission and
/// discarded after. Field names follow the backend contract exactly; the
/// lone camelCase field is the contract's, not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub cart: Vec<OrderLine>,
    #[serde(rename = "discountPercentage")]
    pub discount_percentage: DiscountPercent,
    pub customer_id: Option<i64>,
}

impl OrderPayload {
    /// Builds the submission body from a cart snapshot.
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        OrderPayload {
            cart: snapshot
                .items
                .iter()
                .map(|line| OrderLine {
                    id: line.item_id,
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
            discount_percentage: snapshot.totals.discount_percent,
            customer_id: snapshot.customer.as_ref().map(|c| c.id),
        }
    }
}

/// What the backend returns for a created order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfirmation {
    /// Backend-assigned order id.
    pub id: i64,
    /// Amount charged, as the backend recorded it.
    pub final_total: Money,
    /// When the backend recorded the order.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Checkout Status
// =============================================================================

/// Observable submission status, for disabling the checkout button while a
/// request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStatus {
    /// No submission in flight; checkout may be invoked.
    #[default]
    Idle,
    /// A submission is in flight; further submits are rejected.
    Submitting,
}

/// Guard state: whether a flight is active, and the request id carried
/// across retries of the same cart.
#[derive(Debug, Default)]
struct FlowState {
    submitting: bool,
    request_id: Option<Uuid>,
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Serializes order submission: one in-flight request at a time, local
/// state mutated only on confirmed success.
#[derive(Clone)]
pub struct CheckoutFlow {
    api: ApiClient,
    store: CartStore,
    state: Arc<Mutex<FlowState>>,
    status_tx: Arc<watch::Sender<CheckoutStatus>>,
}

impl CheckoutFlow {
    /// Creates a flow submitting the given store's cart through the given
    /// client.
    pub fn new(api: ApiClient, store: CartStore) -> Self {
        let (status_tx, _) = watch::channel(CheckoutStatus::Idle);
        CheckoutFlow {
            api,
            store,
            state: Arc::new(Mutex::new(FlowState::default())),
            status_tx: Arc::new(status_tx),
        }
    }

    /// Submits the current cart as an order.
    ///
    /// ## Behavior
    /// - Empty cart: fails locally with [`CoreError::EmptyCart`], no request
    /// - Flight already active: fails with
    ///   [`ClientError::SubmissionInProgress`], the first flight unaffected
    /// - Success: the cart store is cleared and the confirmation returned
    /// - Failure: the cart is left exactly as it was; calling `submit`
    ///   again retries with the same cart state and the same request id
    pub async fn submit(&self) -> ClientResult<OrderConfirmation> {
        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let request_id = self.begin_submission()?;
        let payload = OrderPayload::from_snapshot(&snapshot);
        info!(
            %request_id,
            lines = payload.cart.len(),
            total = %snapshot.totals.final_total,
            "Submitting order"
        );

        let result: ClientResult<OrderConfirmation> = self
            .api
            .post_json_idempotent(ORDERS_PATH, &payload, request_id)
            .await;

        match result {
            Ok(confirmation) => {
                // Clear only after the backend confirmed: the displayed cart
                // and the recorded order can never diverge.
                self.store.clear();
                self.finish_submission(true);
                info!(order_id = confirmation.id, "Order confirmed");
                Ok(confirmation)
            }
            Err(err) => {
                self.finish_submission(false);
                warn!(%request_id, error = %err, "Order submission failed");
                Err(err)
            }
        }
    }

    /// Current status without subscribing.
    pub fn status(&self) -> CheckoutStatus {
        *self.status_tx.borrow()
    }

    /// Subscribes to status transitions. The receiver immediately holds the
    /// current status.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutStatus> {
        self.status_tx.subscribe()
    }

    // =========================================================================
    // Guard Internals
    // =========================================================================

    /// Claims the single submission slot and returns the request id to send,
    /// reusing the id from a previously failed attempt when one exists.
    fn begin_submission(&self) -> ClientResult<Uuid> {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if state.submitting {
            return Err(ClientError::SubmissionInProgress);
        }
        state.submitting = true;
        let request_id = *state.request_id.get_or_insert_with(Uuid::new_v4);
        drop(state);

        self.status_tx.send_replace(CheckoutStatus::Submitting);
        Ok(request_id)
    }

    /// Releases the submission slot. On success the request id is discarded
    /// so the next order starts a fresh idempotency sequence; on failure it
    /// is kept for the operator's retry.
    fn finish_submission(&self, success: bool) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.submitting = false;
        if success {
            state.request_id = None;
        }
        drop(state);

        self.status_tx.send_replace(CheckoutStatus::Idle);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::AuthSession;
    use rust_decimal::Decimal;
    use theeni_core::{CatalogItem, Customer};

    fn test_flow() -> CheckoutFlow {
        let config = ClientConfig::new("http://127.0.0.1:8000").unwrap();
        let api = ApiClient::new(config, AuthSession::new()).unwrap();
        CheckoutFlow::new(api, CartStore::new())
    }

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
    fn test_payload_wire_shape() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("2"));
        store.upsert_item(&test_item(2, 50, false), kg("0.25"));
        store.apply_discount(Decimal::from(10));
        store.set_customer(Some(Customer {
            id: 12,
            name: "Asha Rao".to_string(),
            phone_number: None,
            email: None,
        }));

        let payload = OrderPayload::from_snapshot(&store.snapshot());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "cart": [
                    {"id": 1, "quantity": 2.0, "price": 100.0},
                    {"id": 2, "quantity": 0.25, "price": 50.0}
                ],
                "discountPercentage": 10.0,
                "customer_id": 12
            })
        );
    }

    #[test]
    fn test_payload_without_customer_submits_null() {
        let store = CartStore::new();
        store.upsert_item(&test_item(1, 100, true), kg("1"));

        let payload = OrderPayload::from_snapshot(&store.snapshot());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["customer_id"], serde_json::Value::Null);
        assert_eq!(json["discountPercentage"], serde_json::json!(0.0));
    }

    #[test]
    fn test_payload_freezes_prices_from_snapshot() {
        let store = CartStore::new();
        let mut item = test_item(1, 100, true);
        store.upsert_item(&item, kg("1"));

        // Catalog price changes between add and checkout
        item.price = Money::from_major_minor(120, 0);

        let payload = OrderPayload::from_snapshot(&store.snapshot());
        assert_eq!(payload.cart[0].price, Money::from_major_minor(100, 0));
    }

    #[test]
    fn test_confirmation_from_backend_json() {
        let confirmation: OrderConfirmation = serde_json::from_value(serde_json::json!({
            "id": 41,
            "final_total": 230.0,
            "created_at": "2024-03-01T10:15:00Z"
        }))
        .unwrap();

        assert_eq!(confirmation.id, 41);
        assert_eq!(confirmation.final_total, Money::from_major_minor(230, 0));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_locally() {
        let flow = test_flow();

        let result = flow.submit().await;

        assert!(matches!(
            result,
            Err(ClientError::Core(CoreError::EmptyCart))
        ));
        // No flight was started, no request id allocated
        assert_eq!(flow.status(), CheckoutStatus::Idle);
        assert!(flow.state.lock().unwrap().request_id.is_none());
    }

    #[test]
    fn test_second_begin_fails_while_first_in_flight() {
        let flow = test_flow();

        let first = flow.begin_submission().unwrap();
        assert_eq!(flow.status(), CheckoutStatus::Submitting);

        assert!(matches!(
            flow.begin_submission(),
            Err(ClientError::SubmissionInProgress)
        ));

        // Releasing the slot allows the next attempt
        flow.finish_submission(false);
        assert_eq!(flow.status(), CheckoutStatus::Idle);
        let retry = flow.begin_submission().unwrap();
        assert_eq!(retry, first);
    }

    #[test]
    fn test_request_id_survives_failure_renews_on_success() {
        let flow = test_flow();

        let first = flow.begin_submission().unwrap();
        flow.finish_submission(false);

        // Operator retry reuses the same idempotency key
        let retry = flow.begin_submission().unwrap();
        assert_eq!(retry, first);
        flow.finish_submission(true);

        // A confirmed success starts a fresh sequence
        let next = flow.begin_submission().unwrap();
        assert_ne!(next, first);
        flow.finish_submission(false);
    }

    #[tokio::test]
    async fn test_status_observable_through_subscription() {
        let flow = test_flow();
        let mut rx = flow.subscribe();
        assert_eq!(*rx.borrow(), CheckoutStatus::Idle);

        flow.begin_submission().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), CheckoutStatus::Submitting);

        flow.finish_submission(true);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), CheckoutStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_submission_leaves_cart_untouched() {
        // Nothing listens on this port, so the POST fails at transport level
        let config = ClientConfig::from_env_or(Some("http://127.0.0.1:1".to_string()), Some(1))
            .unwrap();
        let api = ApiClient::new(config, AuthSession::new()).unwrap();
        let store = CartStore::new();
        let flow = CheckoutFlow::new(api, store.clone());

        store.upsert_item(&test_item(1, 100, true), kg("2"));
        store.apply_discount(Decimal::from(10));
        let before = store.snapshot();

        let result = flow.submit().await;

        assert!(result.is_err());
        assert_eq!(store.snapshot(), before);
        // Slot released for the operator's retry, id retained
        assert_eq!(flow.status(), CheckoutStatus::Idle);
        assert!(flow.state.lock().unwrap().request_id.is_some());
    }
}
