//! The approval queue.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use spendflow_core::expense::{Decision, ExpenseState};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::CurrentSession;

/// Creates the approval routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(list_pending))
        .route("/approvals/decide", post(decide))
}

/// Request body for a decision. References contain `/`, so they travel in
/// the body rather than the path.
#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    /// Expense reference, e.g. `EXP/1234`.
    #[serde(rename = "ref")]
    pub reference: String,
    /// `approved` or `rejected`.
    pub decision: Decision,
}

/// GET `/approvals` - Pending expenses visible to the session.
async fn list_pending(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Response, ApiError> {
    let pending = state.workflow.list_pending_approvals(&session).await?;
    Ok((StatusCode::OK, Json(json!({ "data": pending }))).into_response())
}

/// POST `/approvals/decide` - Approve or reject every expense with a ref.
async fn decide(
    State(state): State<AppState>,
    _session: CurrentSession,
    Json(payload): Json<DecideRequest>,
) -> Result<Response, ApiError> {
    let updated = state
        .workflow
        .decide_expense(&payload.reference, payload.decision)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "data": {
                "ref": payload.reference,
                "state": ExpenseState::from(payload.decision),
                "updated": updated,
            }
        })),
    )
        .into_response())
}
