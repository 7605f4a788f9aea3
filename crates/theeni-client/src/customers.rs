//! # Customers API
//!
//! Customer lookup, creation, and the order drill-down, plus the debounced
//! search task the register's customer picker drives.
//!
//! ## Debounced Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Debounced Customer Search                            │
//! │                                                                         │
//! │  keystrokes      SearchDebouncer           worker task                  │
//! │  ──────────      ───────────────           ───────────                  │
//! │                                                                         │
//! │  "a" ─────────►  query channel ─────────►  restart 300 ms window        │
//! │  "as" ────────►       │        ─────────►  restart 300 ms window        │
//! │  "asha" ──────►       │        ─────────►  restart 300 ms window        │
//! │                       │                         │ window elapses        │
//! │                       │                         ▼                       │
//! │                       │                    GET /customers/search?q=asha │
//! │                       │                         │                       │
//! │                       │                         ▼                       │
//! │  picker UI ◄───  results watch  ◄──────  publish {generation, matches} │
//! │                                                                         │
//! │  STALE GUARD: a response for generation N is dropped if keystrokes     │
//! │  arrived while it was in flight; the worker moves on to the newer      │
//! │  query instead of publishing outdated matches.                         │
//! │                                                                         │
//! │  SHUTDOWN: dropping the SearchDebouncer closes the query channel;      │
//! │  the worker drains and exits.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use theeni_core::validation::{validate_customer_name, validate_search_query};
use theeni_core::{Customer, Money};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// How long the worker waits after the last keystroke before searching.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// =============================================================================
// Wire Types
// =============================================================================

/// Body for `POST /api/v1/customers`. Only the name is required.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// One row of a customer's order history
/// (`GET /api/v1/customers/{id}/orders`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerOrderRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub final_total: Money,
}

// =============================================================================
// Customer Api
// =============================================================================

/// Typed access to the customer endpoints.
#[derive(Clone)]
pub struct CustomerApi {
    api: ApiClient,
}

impl CustomerApi {
    pub fn new(api: ApiClient) -> Self {
        CustomerApi { api }
    }

    /// Searches customers by name or phone fragment.
    ///
    /// A blank query returns no matches without touching the network; the
    /// backend would interpret it as "everyone".
    pub async fn search(&self, query: &str) -> ClientResult<Vec<Customer>> {
        let query = validate_search_query(query)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.api
            .get_json_query("/api/v1/customers/search", &[("q", query)])
            .await
    }

    /// Creates a customer record. The name is validated locally first; the
    /// backend enforces the rest.
    pub async fn create(&self, new: NewCustomer) -> ClientResult<Customer> {
        let name = validate_customer_name(&new.name)?;
        let body = NewCustomer { name, ..new };
        self.api.post_json("/api/v1/customers", &body).await
    }

    /// A customer's past orders, newest first, for the report drill-down.
    pub async fn orders(&self, customer_id: i64) -> ClientResult<Vec<CustomerOrderRow>> {
        self.api
            .get_json(&format!("/api/v1/customers/{}/orders", customer_id))
            .await
    }
}

// =============================================================================
// Search Debouncer
// =============================================================================

/// Published search results, tagged so consumers can tell which query they
/// answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Monotonic counter; each executed search bumps it.
    pub generation: u64,
    /// The (trimmed) query these matches answer.
    pub query: String,
    /// Matching customers, as the backend returned them.
    pub matches: Vec<Customer>,
}

/// Handle to the debounced search worker.
///
/// Feed it raw keystrokes with [`set_query`](Self::set_query); it collapses
/// bursts into one request per settled query and publishes results over a
/// watch channel. Dropping the handle shuts the worker down.
pub struct SearchDebouncer {
    query_tx: mpsc::UnboundedSender<String>,
    results_rx: watch::Receiver<SearchResults>,
}

impl SearchDebouncer {
    /// Spawns the worker searching through the given API surface.
    pub fn spawn(api: CustomerApi) -> Self {
        Self::spawn_with(move |query| {
            let api = api.clone();
            async move { api.search(&query).await }
        })
    }

    /// Spawns the worker with an arbitrary search function. Exists so the
    /// debounce and staleness behavior is testable without a backend.
    pub fn spawn_with<F, Fut>(search: F) -> Self
    where
        F: Fn(String) -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<Vec<Customer>>> + Send + 'static,
    {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = watch::channel(SearchResults::default());

        tokio::spawn(search_worker(query_rx, results_tx, search));

        SearchDebouncer {
            query_tx,
            results_rx,
        }
    }

    /// Feeds the current contents of the search field. Call on every
    /// keystroke; the worker handles the rest.
    pub fn set_query(&self, query: impl Into<String>) {
        // Send fails only when the worker is gone, which means this handle
        // is being torn down anyway.
        let _ = self.query_tx.send(query.into());
    }

    /// Subscribes to published results. The receiver immediately holds the
    /// latest value (generation 0 / empty before any search ran).
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results_rx.clone()
    }
}

/// The worker loop: absorb keystrokes until the debounce window passes,
/// search once, publish unless the result went stale.
async fn search_worker<F, Fut>(
    mut query_rx: mpsc::UnboundedReceiver<String>,
    results_tx: watch::Sender<SearchResults>,
    search: F,
) where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ClientResult<Vec<Customer>>>,
{
    let mut generation: u64 = 0;

    while let Some(mut query) = query_rx.recv().await {
        // Debounce: every further keystroke restarts the window.
        loop {
            tokio::select! {
                next = query_rx.recv() => match next {
                    Some(next) => query = next,
                    None => return,
                },
                _ = tokio::time::sleep(SEARCH_DEBOUNCE) => break,
            }
        }

        generation += 1;
        let query = match validate_search_query(&query) {
            Ok(trimmed) => trimmed,
            Err(err) => {
                debug!(%err, "Search query rejected");
                continue;
            }
        };

        if query.is_empty() {
            results_tx.send_replace(SearchResults {
                generation,
                query,
                matches: Vec::new(),
            });
            continue;
        }

        debug!(generation, %query, "Running customer search");
        match search(query.clone()).await {
            Ok(matches) => {
                // Stale guard: keystrokes that arrived during the request
                // mean a newer query is pending; drop this result.
                if !query_rx.is_empty() {
                    debug!(generation, %query, "Discarding stale search result");
                    continue;
                }
                results_tx.send_replace(SearchResults {
                    generation,
                    query,
                    matches,
                });
            }
            Err(err) => {
                // Search failures are transient; the picker keeps showing
                // the previous results and the next keystroke retries.
                warn!(generation, %query, error = %err, "Customer search failed");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
