//! Catalog Store
//!
//! Owns the [`CatalogState`] and runs the four fetch operations against a
//! [`ProductApi`]. Each operation builds its query, awaits the response and
//! merges it through [`CatalogState::reduce`]. The state lock is taken only
//! for the merge, never across the network await.
//!
//! Failures (transport, non-success status, malformed body) are logged and
//! swallowed: the state is left exactly as it was and the caller gets no
//! signal. There is no retry, no de-duplication and no cancellation; two
//! concurrent calls of the same operation race and the last one to land wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::domain::{
    AppConfig, CountPayload, FilteredParams, LibraryConfig, ListingParams, ProductPage,
    ProductQuery, SubcategoryParams,
};
use crate::error::Result;
use crate::services::{
    CatalogEvent, FetchOperation, HttpProductApi, ProductApi, generate_request_id,
    spawn_named_in_tokio,
};
use crate::state::{CatalogAction, CatalogSlice, CatalogState};

/// Client-side store for the library catalog
pub struct CatalogStore<A: ProductApi> {
    /// HTTP collaborator
    api: Arc<A>,
    /// Shared state, written only on fetch completion
    state: Arc<RwLock<CatalogState>>,
    /// Category pinned for the filtered listing and count
    library_category: Arc<str>,
    /// Page size added to listings that don't set one
    page_size: Option<u32>,
    /// One sender per live subscriber
    subscribers: Arc<Mutex<Vec<Sender<CatalogEvent>>>>,
}

impl CatalogStore<HttpProductApi> {
    /// Build a store talking to the configured backend
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = HttpProductApi::new(&config.api)?;
        tracing::info!(
            "Catalog store using {} (library category {})",
            api.base_url(),
            config.library.category
        );
        Ok(Self::new(api, &config.library))
    }
}

impl<A: ProductApi> CatalogStore<A> {
    /// Create a store with empty state
    pub fn new(api: A, library: &LibraryConfig) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(RwLock::new(CatalogState::new())),
            library_category: library.category.as_str().into(),
            page_size: library.page_size,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a store with the default library configuration
    pub fn with_api(api: A) -> Self {
        Self::new(api, &LibraryConfig::default())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn library_category(&self) -> &str {
        &self.library_category
    }

    /// Subscribe to change notifications
    ///
    /// Every subscriber gets its own bounded channel and sees only events
    /// emitted after it subscribed. A subscriber that falls
    /// `EVENT_CHANNEL_CAPACITY` events behind misses the newer ones until it
    /// drains; the state itself is always current. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<CatalogEvent> {
        let (tx, rx) = crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY);
        self.lock_subscribers().push(tx);
        rx
    }

    // ==================== Fetch Operations ====================

    /// Category listing; on success replaces `items`
    pub async fn fetch_primary(&self, params: &ListingParams) {
        self.run(FetchOperation::Primary, params.to_query()).await
    }

    /// Category + subcategory listing; on success appends to `items`
    pub async fn fetch_secondary(&self, params: &SubcategoryParams) {
        self.run(FetchOperation::Secondary, params.to_query()).await
    }

    /// Subcategory listing within the library category; on success
    /// replaces `filtered_items`
    pub async fn fetch_filtered_ascending(&self, params: &FilteredParams) {
        let query = params.to_query(&self.library_category);
        self.run(FetchOperation::FilteredAscending, query).await
    }

    /// Count for the library category; on success replaces `count`
    pub async fn fetch_count(&self) {
        let query = ProductQuery::count(&self.library_category);
        self.run(FetchOperation::Count, query).await
    }

    /// Run the primary listing and the count concurrently
    pub async fn refresh(&self, params: &ListingParams) {
        futures::join!(self.fetch_primary(params), self.fetch_count());
    }

    /// Reset `items` so subcategory appends start from scratch
    pub async fn clear_items(&self) {
        self.state.write().await.reduce(CatalogAction::ItemsCleared);
        self.notify(CatalogEvent::ItemsCleared);
    }

    // ==================== Fire-and-forget ====================

    /// Spawn [`Self::fetch_primary`] and return immediately
    pub fn dispatch_primary(&self, params: ListingParams) -> JoinHandle<()> {
        let store = self.clone();
        spawn_named_in_tokio(FetchOperation::Primary.label(), async move {
            store.fetch_primary(&params).await
        })
    }

    /// Spawn [`Self::fetch_secondary`] and return immediately
    pub fn dispatch_secondary(&self, params: SubcategoryParams) -> JoinHandle<()> {
        let store = self.clone();
        spawn_named_in_tokio(FetchOperation::Secondary.label(), async move {
            store.fetch_secondary(&params).await
        })
    }

    /// Spawn [`Self::fetch_filtered_ascending`] and return immediately
    pub fn dispatch_filtered_ascending(&self, params: FilteredParams) -> JoinHandle<()> {
        let store = self.clone();
        spawn_named_in_tokio(FetchOperation::FilteredAscending.label(), async move {
            store.fetch_filtered_ascending(&params).await
        })
    }

    /// Spawn [`Self::fetch_count`] and return immediately
    pub fn dispatch_count(&self) -> JoinHandle<()> {
        let store = self.clone();
        spawn_named_in_tokio(FetchOperation::Count.label(), async move {
            store.fetch_count().await
        })
    }

    // ==================== State Access ====================

    /// Clone of the current state
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    /// Read the state without cloning it
    pub async fn with_state<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Non-blocking snapshot for synchronous callers; `None` while a merge
    /// holds the lock
    pub fn try_snapshot(&self) -> Option<CatalogState> {
        self.state.try_read().ok().map(|state| (*state).clone())
    }

    // ==================== Internals ====================

    async fn run(&self, operation: FetchOperation, query: ProductQuery) {
        let query = query.with_default_size(self.page_size);
        let request_id = generate_request_id();

        match self.request(operation, &request_id, &query).await {
            Ok(action) => {
                let slice = self.apply(operation, action).await;
                tracing::info!(
                    "{} [{}] merged into {}",
                    operation,
                    request_id,
                    slice.label()
                );
            }
            Err(e) => {
                tracing::warn!("{} [{}] failed: {}", operation, request_id, e);
            }
        }
    }

    async fn request(
        &self,
        operation: FetchOperation,
        request_id: &str,
        query: &ProductQuery,
    ) -> Result<CatalogAction> {
        let path = query.to_path()?;
        tracing::debug!("{} [{}] GET {}", operation, request_id, path);

        let body = self.api.get(&path).await?;
        decode(operation, body)
    }

    async fn apply(&self, operation: FetchOperation, action: CatalogAction) -> CatalogSlice {
        let slice = self.state.write().await.reduce(action);
        debug_assert_eq!(slice, operation.slice());
        self.notify(CatalogEvent::Updated { operation, slice });
        slice
    }

    fn notify(&self, event: CatalogEvent) {
        self.lock_subscribers()
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(event)) => {
                    tracing::debug!("Catalog subscriber lagging, dropping {:?}", event);
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<CatalogEvent>>> {
        // The list stays valid even if a holder panicked
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Turn a response body into the merge for `operation`
fn decode(operation: FetchOperation, body: Value) -> Result<CatalogAction> {
    Ok(match operation {
        FetchOperation::Primary => CatalogAction::PrimaryLoaded(ProductPage::from_json(body)?),
        FetchOperation::Secondary => CatalogAction::SecondaryLoaded(ProductPage::from_json(body)?),
        FetchOperation::FilteredAscending => {
            CatalogAction::FilteredLoaded(ProductPage::from_json(body)?)
        }
        FetchOperation::Count => CatalogAction::CountLoaded(CountPayload::from_json(body)?),
    })
}

impl<A: ProductApi> Clone for CatalogStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            library_category: self.library_category.clone(),
            page_size: self.page_size,
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<A: ProductApi + std::fmt::Debug> std::fmt::Debug for CatalogStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("api", &self.api)
            .field("library_category", &self.library_category)
            .field("page_size", &self.page_size)
            .finish()
    }
}
