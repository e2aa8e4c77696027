//! Country list for the signup form.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::AppState;

/// Creates the country routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/countries", get(list_countries))
}

/// GET `/countries` - Country names, sorted.
///
/// Answers `["Unable to load"]` when the directory is unreachable.
async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    let countries = state.lookup.list_countries().await;
    (StatusCode::OK, Json(json!({ "data": countries })))
}
