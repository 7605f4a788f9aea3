//! # Catalog API
//!
//! The item catalog: the register lists it, the admin screens maintain it.
//! Items are backend-owned reference data; this surface never caches them,
//! the shell refetches after any change.

use serde::Serialize;

use theeni_core::validation::{validate_item_name, validate_item_price, validate_quick_code};
use theeni_core::{CatalogItem, Money};

use crate::error::ClientResult;
use crate::http::ApiClient;

// =============================================================================
// Wire Types
// =============================================================================

/// Body for `POST /api/v1/items` and `PUT /api/v1/items/{id}`.
///
/// The same shape serves create and update; the backend treats a `PUT` as a
/// full replacement of the mutable fields.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub price: Money,
    pub quick_code: Option<String>,
    pub image_url: Option<String>,
    pub is_discount_eligible: bool,
}

impl ItemPayload {
    /// Builds a payload from admin form input, applying the local checks
    /// (name required, price non-negative, quick code format).
    pub fn from_form(
        name: &str,
        price: Money,
        quick_code: &str,
        image_url: Option<String>,
        is_discount_eligible: bool,
    ) -> ClientResult<Self> {
        let name = validate_item_name(name)?;
        validate_item_price(price.amount())?;
        let quick_code = validate_quick_code(quick_code)?;

        Ok(ItemPayload {
            name,
            price,
            quick_code,
            image_url,
            is_discount_eligible,
        })
    }
}

// =============================================================================
// Catalog Api
// =============================================================================

/// Typed access to the item endpoints.
#[derive(Clone)]
pub struct CatalogApi {
    api: ApiClient,
}

impl CatalogApi {
    pub fn new(api: ApiClient) -> Self {
        CatalogApi { api }
    }

    /// The full catalog, as the register's item grid displays it.
    pub async fn list_items(&self) -> ClientResult<Vec<CatalogItem>> {
        self.api.get_json("/api/v1/items").await
    }

    /// Creates a catalog item (admin only; the backend enforces the role).
    pub async fn create_item(&self, payload: ItemPayload) -> ClientResult<CatalogItem> {
        self.api.post_json("/api/v1/items", &payload).await
    }

    /// Updates a catalog item in place. Lines already in a cart keep their
    /// frozen snapshot; only future adds see the new values.
    pub async fn update_item(&self, id: i64, payload: ItemPayload) -> ClientResult<CatalogItem> {
        self.api
            .put_json(&format!("/api/v1/items/{}", id), &payload)
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
