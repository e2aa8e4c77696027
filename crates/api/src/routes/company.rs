//! The session's company.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use spendflow_core::directory::AccountService;

use crate::AppState;
use crate::error::error_response;
use crate::middleware::CurrentSession;

/// Creates the company routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/company", get(company_info))
}

/// GET `/company` - Name, country and currency of the session's company.
async fn company_info(CurrentSession(session): CurrentSession) -> Response {
    match AccountService::company_info(&session) {
        Some(company) => (StatusCode::OK, Json(json!({ "data": company }))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "no_company",
            "The current user has no company",
        ),
    }
}
