//! Errors raised by the external lookup services.

use thiserror::Error;

/// An external lookup service could not produce a usable response.
///
/// Callers in this crate never surface this as a hard failure; each call
/// site degrades to a default (`USD`, a sentinel list, or an unconverted
/// amount).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request could not be sent or the connection failed.
    #[error("request to {service} failed: {message}")]
    Transport {
        /// Which service was called.
        service: &'static str,
        /// Transport error message.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {service} timed out")]
    Timeout {
        /// Which service was called.
        service: &'static str,
    },

    /// The service answered with a non-success status.
    #[error("{service} responded with status {status}")]
    Status {
        /// Which service was called.
        service: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("could not decode {service} response: {message}")]
    Decode {
        /// Which service was called.
        service: &'static str,
        /// Decoder message.
        message: String,
    },
}

impl ServiceError {
    /// Name of the service that failed.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::Timeout { service }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }
}
