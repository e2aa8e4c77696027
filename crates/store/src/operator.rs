//! Operator construction from configuration.

use opendal::{Operator, services};
use spendflow_shared::StorageBackend;
use spendflow_shared::config::StorageSettings;
use thiserror::Error;
use tracing::info;

/// The configured backend could not be initialised.
#[derive(Debug, Error)]
#[error("storage configuration error: {0}")]
pub struct StoreSetupError(String);

/// Builds the operator for the configured backend.
///
/// # Errors
///
/// Returns an error if the backend rejects its configuration.
pub fn build_operator(settings: &StorageSettings) -> Result<Operator, StoreSetupError> {
    let operator = match settings.provider {
        StorageBackend::Memory => Operator::new(services::Memory::default())
            .map_err(|e| StoreSetupError(e.to_string()))?
            .finish(),
        StorageBackend::Fs => Operator::new(services::Fs::default().root(&settings.root))
            .map_err(|e| StoreSetupError(e.to_string()))?
            .finish(),
    };

    info!(provider = ?settings.provider, root = %settings.root, "Storage operator ready");
    Ok(operator)
}
