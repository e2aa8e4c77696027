//! A JSON array stored under one key.

use std::marker::PhantomData;

use async_trait::async_trait;
use opendal::{ErrorKind, Operator};
use serde::Serialize;
use serde::de::DeserializeOwned;
use spendflow_core::store::{Repository, StoreError};
use tracing::{debug, error};

/// Reads a blob, treating a missing key as no content.
pub(crate) async fn read_blob(operator: &Operator, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
    match operator.read(key).await {
        Ok(buffer) => Ok(Some(buffer.to_vec())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            error!(error = %e, key, "Storage read failed");
            Err(StoreError::Backend(e.to_string()))
        }
    }
}

/// Writes a blob, replacing any previous content.
pub(crate) async fn write_blob(operator: &Operator, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
    operator.write(key, body).await.map(|_| ()).map_err(|e| {
        error!(error = %e, key, "Storage write failed");
        StoreError::Backend(e.to_string())
    })
}

/// Decodes a stored body as `Option<T>`; blank bodies decode as `None`.
pub(crate) fn decode<T: DeserializeOwned>(key: &str, body: &[u8]) -> Result<Option<T>, StoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Collection of `T` stored as a JSON array under `key`.
///
/// An absent key, an empty body or a JSON `null` all load as the empty
/// collection.
#[derive(Debug, Clone)]
pub struct JsonCollection<T> {
    operator: Operator,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T> {
    /// Creates a collection stored under `key`.
    #[must_use]
    pub fn new(operator: Operator, key: impl Into<String>) -> Self {
        Self {
            operator,
            key: key.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Repository<T> for JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let Some(body) = read_blob(&self.operator, &self.key).await? else {
            return Ok(Vec::new());
        };
        let items: Vec<T> = decode(&self.key, &body)?.unwrap_or_default();
        debug!(key = %self.key, count = items.len(), "Loaded collection");
        Ok(items)
    }

    async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let body = serde_json::to_vec(items).map_err(|e| StoreError::Encode {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        write_blob(&self.operator, &self.key, body).await?;
        debug!(key = %self.key, count = items.len(), "Saved collection");
        Ok(())
    }
}
