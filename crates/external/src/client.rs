//! Shared HTTP plumbing.

use std::time::Duration;

use serde::de::DeserializeOwned;
use spendflow_core::currency::ServiceError;
use thiserror::Error;
use tracing::debug;

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientSetupError(#[from] reqwest::Error);

/// Builds a client whose requests expire after `timeout_secs`.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ClientSetupError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

fn transport_error(service: &'static str, err: &reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout { service }
    } else {
        ServiceError::Transport {
            service,
            message: err.to_string(),
        }
    }
}

/// Decodes a JSON body, tagging failures with `service`.
pub(crate) fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    body: &[u8],
) -> Result<T, ServiceError> {
    serde_json::from_slice(body).map_err(|e| ServiceError::Decode {
        service,
        message: e.to_string(),
    })
}

/// GETs `url` and decodes a successful JSON response.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    service: &'static str,
    url: &str,
) -> Result<T, ServiceError> {
    debug!(service, url, "Calling external service");
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(service, &e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            service,
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await.map_err(|e| transport_error(service, &e))?;
    decode_json(service, &body)
}
