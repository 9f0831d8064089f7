//! Document store abstraction.
//!
//! Handlers and services only talk to [`DocumentStore`], so the gateway can
//! run against MongoDB in production and against [`super::InMemoryStore`]
//! in tests.

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::utils::AppError;

/// Counts reported by a single-document `$set` update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents whose top-level fields equal `filter`, oldest first.
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    /// First document matching `filter`. With a projection, only `_id` and the
    /// fields set to a truthy value in `projection` are returned.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Option<Document>, AppError>;

    /// Inserts `document`, generating an ObjectId `_id` when absent.
    /// Returns the `_id` of the stored document.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, AppError>;

    /// Applies `$set: fields` to the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    async fn close(&self);
}

/// Shared slot for the connected store.
///
/// Routes are mounted before the connection exists; until [`StoreHandle::install`]
/// runs, [`StoreHandle::get`] answers [`AppError::StoreUnavailable`].
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Arc<OnceCell<Arc<dyn DocumentStore>>>,
}

impl StoreHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that is ready from the start
    #[cfg(test)]
    pub fn ready(store: Arc<dyn DocumentStore>) -> Self {
        let handle = Self::new();
        handle.install(store);
        handle
    }

    /// Returns false if a store was already installed.
    pub fn install(&self, store: Arc<dyn DocumentStore>) -> bool {
        self.inner.set(store).is_ok()
    }

    pub fn get(&self) -> Result<Arc<dyn DocumentStore>, AppError> {
        self.inner.get().cloned().ok_or(AppError::StoreUnavailable)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.initialized()
    }

    pub async fn close(&self) {
        if let Some(store) = self.inner.get() {
            store.close().await;
        }
    }
}
