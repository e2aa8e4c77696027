//! Persistence ports for the keyed collections.
//!
//! Every collection (users, expenses, rules) is read and written wholesale:
//! [`Repository::load`] returns the full sequence and [`Repository::save`]
//! replaces it. The active session is a single optional snapshot behind
//! [`SessionStore`]. Adapters live in `spendflow-store`; the in-memory
//! fixtures here back unit tests and embedders that need no persistence.

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::directory::Session;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("storage backend failed: {0}")]
    Backend(String),

    /// A stored blob could not be decoded.
    #[error("stored data under '{key}' is corrupt: {message}")]
    Corrupt {
        /// Storage key of the blob.
        key: String,
        /// Decoder message.
        message: String,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode '{key}': {message}")]
    Encode {
        /// Storage key of the blob.
        key: String,
        /// Encoder message.
        message: String,
    },
}

/// Wholesale load/save access to one stored collection.
///
/// An absent or empty collection loads as the empty sequence.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Loads the full collection in insertion order.
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the full collection.
    async fn save(&self, items: &[T]) -> Result<(), StoreError>;
}

/// Storage for the snapshot of the currently active user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the active session, if any.
    async fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Replaces the active session.
    async fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Removes the active session.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// A repository plus a process-local lock around read-modify-write.
///
/// The lock only serializes writers inside this process; separate
/// processes sharing a backend can still overwrite each other.
pub struct Collection<T>
where
    T: Send + Sync + 'static,
{
    repository: Arc<dyn Repository<T>>,
    write_lock: Mutex<()>,
}

impl<T> Collection<T>
where
    T: Send + Sync + 'static,
{
    /// Wraps a repository.
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the full collection.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        self.repository.load().await
    }

    /// Loads, applies `f`, and saves the result when `f` succeeds.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn mutate<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E> + Send,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.repository.load().await?;
        let result = f(&mut items)?;
        self.repository.save(&items).await?;
        Ok(result)
    }
}

/// In-memory repository.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: StdMutex<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl<T> InMemoryRepository<T> {
    /// Creates a repository pre-filled with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: StdMutex::new(items),
        }
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        self.items
            .lock()
            .map(|items| items.clone())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *guard = items.to_vec();
        Ok(())
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: StdMutex<Option<Session>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        self.session
            .lock()
            .map(|s| s.clone())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
