//! Session-wide catalog state.
//!
//! `CatalogStore` mirrors the page of products most recently loaded from the
//! management API, the listing cursor, the bulk-selection set and a single
//! request status (busy flag + last error) shared by every action.
//!
//! Each networked action follows the same cycle: mark busy and clear the
//! error, call the API, reconcile the response into local state, clear busy.
//! A failure is recorded in `error` and leaves the products as they were.
//!
//! The state lock is never held across a network call, so actions can run
//! concurrently and do not wait on each other. They also do not coordinate:
//! the busy flag and error are last-writer-wins, and a status patch that
//! completes after a newer listing landed is applied to the new listing (and
//! is a no-op if its id is no longer there).

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use catalog_core::{DomainError, RecordId};
use catalog_products::{
    ActiveFilter, DEFAULT_PAGE_SIZE, FilterOverrides, Product, ProductCollection, ProductFilter,
    ProductId, SelectionSet, listing_rows,
};

use crate::ack::Acknowledgement;
use crate::client::{ApiError, CatalogApi};

const STATUS_UPDATE_FAILED: &str = "Failed to update product status";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Transport(#[from] ApiError),

    /// The API answered but did not acknowledge the change.
    #[error("{0}")]
    Rejected(String),

    #[error("response did not include the created product's identifier")]
    MissingIdentifier,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Point-in-time copy of the store, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub selected: Vec<ProductId>,
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct CatalogState {
    products: ProductCollection,
    selected: SelectionSet,
    search: String,
    page: u32,
    page_size: u32,
    loading: bool,
    error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            products: ProductCollection::new(),
            selected: SelectionSet::new(),
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            error: None,
        }
    }
}

impl CatalogState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn settle<T>(&mut self, result: &Result<T, StoreError>) {
        if let Err(err) = result {
            self.error = Some(err.to_string());
        }
        self.loading = false;
    }

    fn listing_filter(&self) -> ProductFilter {
        ProductFilter {
            search: self.search.clone(),
            page_size: self.page_size,
            active: ActiveFilter::ActiveOnly,
            page: self.page,
        }
    }
}

/// Handle to the session's catalog state.
///
/// Cheap to clone; all clones share the same state and API client.
#[derive(Clone)]
pub struct CatalogStore {
    api: Arc<dyn CatalogApi>,
    state: Arc<Mutex<CatalogState>>,
}

impl core::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogStore").finish_non_exhaustive()
    }
}

impl CatalogStore {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    pub fn with_api<A: CatalogApi + 'static>(api: A) -> Self {
        Self::new(Arc::new(api))
    }

    /// Load a page of products using the current cursor, adjusted by
    /// `overrides` for this request only.
    ///
    /// The collection becomes exactly the `data.data` rows, unmodified; a body
    /// without that array empties it. Only transport failures are errors.
    /// Returns the number of products loaded.
    pub async fn fetch_products(&self, overrides: FilterOverrides) -> Result<usize, StoreError> {
        let filter = {
            let mut state = self.state.lock().await;
            state.begin();
            state.listing_filter().merged(&overrides)
        };

        let outcome = self.api.list_products(&filter).await;

        let mut state = self.state.lock().await;
        let result = match outcome {
            Ok(body) => {
                let rows = listing_rows(&body);
                let unidentified = rows.iter().filter(|p| p.id().is_none()).count();
                if unidentified > 0 {
                    tracing::warn!(unidentified, "listing rows without a usable id");
                }
                let count = rows.len();
                state.products.replace(rows);
                tracing::debug!(count, page = filter.page, "loaded product page");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching products");
                Err(StoreError::from(e))
            }
        };
        state.settle(&result);
        result
    }

    /// Set the active flag of one product.
    ///
    /// Returns whether a product with that id was in the loaded page (an
    /// absent id is not an error).
    pub async fn update_product_status(
        &self,
        id: &ProductId,
        active: bool,
    ) -> Result<bool, StoreError> {
        self.state.lock().await.begin();

        let outcome = self.api.set_status(id, active).await;

        let mut state = self.state.lock().await;
        let result = acknowledged(outcome).map(|_| {
            let patched = state.products.set_active(id, active);
            tracing::info!(%id, active, "updated product status");
            patched
        });
        if let Err(e) = &result {
            tracing::error!(%id, error = %e, "error updating product status");
        }
        state.settle(&result);
        result
    }

    /// Set the active flag of several products in one request.
    ///
    /// Returns how many of them were in the loaded page.
    pub async fn bulk_update_status(
        &self,
        ids: &[ProductId],
        active: bool,
    ) -> Result<usize, StoreError> {
        self.state.lock().await.begin();

        let outcome = self.api.bulk_set_status(ids, active).await;

        let mut state = self.state.lock().await;
        let result = acknowledged(outcome).map(|_| {
            let touched = state.products.set_active_many(ids, active);
            tracing::info!(count = ids.len(), touched, active, "updated products status");
            touched
        });
        if let Err(e) = &result {
            tracing::error!(count = ids.len(), error = %e, "error updating product status");
        }
        state.settle(&result);
        result
    }

    /// Submit a new product and put it at the front of the loaded page.
    ///
    /// The local record is the submitted payload plus the id from the
    /// response's `data.id`, marked active. Returns the raw response. Any
    /// failure is recorded in `error` and also returned.
    pub async fn create_product(&self, payload: Value) -> Result<Value, StoreError> {
        self.state.lock().await.begin();

        let outcome = self.api.create_product(&payload).await;

        let mut state = self.state.lock().await;
        let result = outcome.map_err(StoreError::from).and_then(|body| {
            let product = created_product(&payload, &body)?;
            tracing::info!(id = %body["data"]["id"], name = product.name(), "created product");
            state.products.prepend(product);
            Ok(body)
        });
        if let Err(e) = &result {
            tracing::error!(error = %e, "failed to create product");
        }
        state.settle(&result);
        result
    }

    /// Select `id` for bulk actions, or deselect it if already selected.
    /// Returns whether it is selected afterwards.
    pub async fn toggle_selection(&self, id: ProductId) -> bool {
        self.state.lock().await.selected.toggle(id)
    }

    pub async fn set_search(&self, search: impl Into<String>) {
        self.state.lock().await.search = search.into();
    }

    pub async fn set_page(&self, page: u32) {
        self.state.lock().await.page = page;
    }

    pub async fn set_page_size(&self, page_size: u32) {
        self.state.lock().await.page_size = page_size;
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.lock().await.products.as_slice().to_vec()
    }

    pub async fn selected(&self) -> Vec<ProductId> {
        self.state.lock().await.selected.to_vec()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.lock().await;
        CatalogSnapshot {
            products: state.products.as_slice().to_vec(),
            selected: state.selected.to_vec(),
            search: state.search.clone(),
            page: state.page,
            page_size: state.page_size,
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

fn acknowledged(outcome: Result<Acknowledgement, ApiError>) -> Result<Value, StoreError> {
    outcome?
        .into_result(STATUS_UPDATE_FAILED)
        .map_err(StoreError::Rejected)
}

fn created_product(payload: &Value, response: &Value) -> Result<Product, StoreError> {
    let id = response
        .get("data")
        .and_then(|data| data.get("id"))
        .filter(|id| !id.is_null())
        .ok_or(StoreError::MissingIdentifier)?;
    let id = ProductId(RecordId::from_json(id)?);

    let fields = payload
        .as_object()
        .ok_or_else(|| DomainError::validation("product payload must be a JSON object"))?;

    Ok(Product::from_submission(fields, id, Local::now().date_naive()))
}
