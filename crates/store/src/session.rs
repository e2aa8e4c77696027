//! The active session snapshot, stored as a single JSON object.

use async_trait::async_trait;
use opendal::Operator;
use spendflow_core::directory::Session;
use spendflow_core::store::{SessionStore, StoreError};
use tracing::error;

use crate::collection::{decode, read_blob, write_blob};

/// Session snapshot stored as JSON under `key`.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    operator: Operator,
    key: String,
}

impl JsonSessionStore {
    /// Creates a store under `key`.
    #[must_use]
    pub fn new(operator: Operator, key: impl Into<String>) -> Self {
        Self {
            operator,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        match read_blob(&self.operator, &self.key).await? {
            Some(body) => decode(&self.key, &body),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let body = serde_json::to_vec(session).map_err(|e| StoreError::Encode {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        write_blob(&self.operator, &self.key, body).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.operator.delete(&self.key).await.map_err(|e| {
            error!(error = %e, key = %self.key, "Session clear failed");
            StoreError::Backend(e.to_string())
        })
    }
}
