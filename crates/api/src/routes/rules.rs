//! Approval rule descriptors.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::CurrentSession;

/// Creates the rule routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rules", get(list_rules).post(create_rule))
}

/// Request body for a new rule.
#[derive(Debug, Deserialize)]
pub struct CreateRuleRequest {
    /// Display name.
    pub name: String,
    /// Rule kind.
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Optional threshold.
    #[serde(default)]
    pub threshold: String,
}

/// GET `/rules` - Every rule, in creation order.
async fn list_rules(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Response, ApiError> {
    let rules = state.rules.list_rules().await?;
    Ok((StatusCode::OK, Json(json!({ "data": rules }))).into_response())
}

/// POST `/rules` - Store a rule.
async fn create_rule(
    State(state): State<AppState>,
    _session: CurrentSession,
    Json(payload): Json<CreateRuleRequest>,
) -> Result<Response, ApiError> {
    let rule = state
        .rules
        .create_rule(&payload.name, &payload.rule_type, &payload.threshold)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": rule }))).into_response())
}
