//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::session_middleware};

pub mod approvals;
pub mod auth;
pub mod company;
pub mod countries;
pub mod expenses;
pub mod health;
pub mod rules;
pub mod users;

/// Creates the API router; everything except health, countries and the
/// login/signup/logout endpoints requires an active session.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::session_routes())
        .merge(company::routes())
        .merge(expenses::routes())
        .merge(approvals::routes())
        .merge(users::routes())
        .merge(rules::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(countries::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
