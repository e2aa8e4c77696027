//! Core business logic for Spendflow.
//!
//! Domain types, workflow rules and currency handling live here. Storage
//! and external services are reached through the ports in [`store`] and
//! [`currency`]; concrete adapters live in `spendflow-store` and
//! `spendflow-external`.
//!
//! # Modules
//!
//! - `directory` - Users, companies and the active session
//! - `expense` - Expense submission and the approval workflow
//! - `currency` - Country currencies and exchange rate conversion
//! - `rules` - Approval rule definitions
//! - `store` - Persistence ports

pub mod currency;
pub mod directory;
pub mod expense;
pub mod rules;
pub mod store;

pub use store::StoreError;

impl From<StoreError> for spendflow_shared::AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
