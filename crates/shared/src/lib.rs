//! Shared types, errors, and configuration for Spendflow.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and two-decimal rounding helpers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, StorageBackend, WorkflowConfig};
pub use error::AppError;
pub use types::{CurrencyCode, DEFAULT_CURRENCY};
