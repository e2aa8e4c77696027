//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Session middleware and the [`middleware::CurrentSession`] extractor
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use spendflow_core::currency::CurrencyLookup;
use spendflow_core::directory::AccountService;
use spendflow_core::expense::ExpenseWorkflow;
use spendflow_core::rules::RuleDirectory;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Signup, login and the session store.
    pub accounts: Arc<AccountService>,
    /// Expense submission and approvals.
    pub workflow: Arc<ExpenseWorkflow>,
    /// Approval rule descriptors.
    pub rules: Arc<RuleDirectory>,
    /// Country list and currency resolution.
    pub lookup: Arc<CurrencyLookup>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
