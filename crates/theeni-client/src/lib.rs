//! # theeni-client: Backend API Client and Shared State for Theeni POS
//!
//! Everything between the pure domain logic in `theeni-core` and a UI
//! shell: configuration, the auth session, the HTTP client, typed API
//! surfaces, the observable cart store, and the checkout flow.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Theeni POS Client Layer                             │
//! │                                                                         │
//! │  UI shell (out of scope: rendering, routing, input handling)           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 theeni-client (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │  CartStore ◄── CheckoutFlow ──► ApiClient ──► backend REST API │   │
//! │  │      │                              │                           │   │
//! │  │      │         CatalogApi ──────────┤                           │   │
//! │  │      │         CustomerApi ─────────┤                           │   │
//! │  │      │         ReportsApi ──────────┤                           │   │
//! │  │      │                              │                           │   │
//! │  │      │         AuthSession ◄────────┘ (bearer token, 401)       │   │
//! │  │      ▼                                                          │   │
//! │  │  watch channels: CartSnapshot, CheckoutStatus, SessionState,   │   │
//! │  │                  SearchResults                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  theeni-core (Cart, Money, Quantity, validation)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typical Wiring
//!
//! ```rust,no_run
//! use theeni_client::{
//!     ApiClient, AuthSession, CartStore, CheckoutFlow, ClientConfig,
//! };
//!
//! # async fn wire() -> theeni_client::ClientResult<()> {
//! let config = ClientConfig::from_env_or(None, None)?;
//! let session = AuthSession::with_persistence();
//! let api = ApiClient::new(config, session.clone())?;
//!
//! let store = CartStore::new();
//! let _checkout = CheckoutFlow::new(api.clone(), store.clone());
//!
//! session.restore().await;
//! if !session.is_authenticated().await {
//!     api.login("admin", "secret").await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//! Every store publishes over `tokio::sync::watch`; a shell subscribes
//! once per surface and re-renders on change. All modules log through
//! `tracing`; call [`init_tracing`] once at startup (or install your own
//! subscriber).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod customers;
pub mod error;
pub mod http;
pub mod reports;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogApi, ItemPayload};
pub use checkout::{CheckoutFlow, CheckoutStatus, OrderConfirmation, OrderLine, OrderPayload};
pub use config::ClientConfig;
pub use customers::{
    CustomerApi, CustomerOrderRow, NewCustomer, SearchDebouncer, SearchResults, SEARCH_DEBOUNCE,
};
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use reports::{
    CustomerReportRow, ItemSalesRow, OrderItemRow, ReportsApi, SalesReport, SalesSummary,
};
pub use session::{AuthSession, SessionState, SessionUser};
pub use store::{CartSnapshot, CartStore};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `THEENI_LOG=debug` - Show debug messages everywhere
/// - `THEENI_LOG=theeni_client=trace` - Trace for this crate only
/// - Falls back to `RUST_LOG`, then to the default below
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("THEENI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info,theeni_core=debug,theeni_client=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
