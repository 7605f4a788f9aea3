//! # theeni-core: Pure Business Logic for Theeni POS
//!
//! This crate is the **heart** of Theeni POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Theeni POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        UI Shell                                 │   │
//! │  │    Item grid ──► Cart panel ──► Checkout dialog ──► Reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  theeni-client (state + HTTP)                   │   │
//! │  │    CartStore, CheckoutFlow, AuthSession, API surfaces          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ theeni-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ CatalogIt.│  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ Customer  │  │ Quantity  │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Customer, DiscountPercent, Role)
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`quantity`] - Weighed kilogram quantities with the fixed 0.25 kg step
//! - [`cart`] - The in-progress order and its pricing derivations
//! - [`error`] - Domain error types
//! - [`validation`] - Free-form input parsing and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Exact Decimals**: Money and Quantity wrap `rust_decimal::Decimal`;
//!    floats exist only at the JSON boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use theeni_core::cart::Cart;
//! use theeni_core::money::Money;
//! use theeni_core::quantity::Quantity;
//! use theeni_core::types::CatalogItem;
//!
//! let barfi = CatalogItem {
//!     id: 1,
//!     name: "Besan Barfi".to_string(),
//!     quick_code: Some("BB".to_string()),
//!     price: Money::from_major_minor(100, 0),
//!     unit: "kg".to_string(),
//!     is_discount_eligible: true,
//!     image_url: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.upsert_item(&barfi, Quantity::new(Decimal::new(2, 0)));
//! cart.apply_discount(Decimal::from(10));
//!
//! assert_eq!(cart.final_total(), Money::from_major_minor(180, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use theeni_core::Money` instead of
// `use theeni_core::money::Money`

pub use cart::{Cart, CartTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use types::{CatalogItem, Customer, DiscountPercent, Role};
