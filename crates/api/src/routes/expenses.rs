//! Expense submission, listing and conversion preview.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use spendflow_core::currency::Conversion;
use spendflow_core::expense::NewExpense;
use spendflow_shared::CurrencyCode;

use crate::AppState;
use crate::error::{ApiError, error_response};
use crate::middleware::CurrentSession;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(submit_expense))
        .route("/expenses/preview", post(preview_conversion))
}

/// Request body for a conversion preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Amount in `base`.
    pub amount: Decimal,
    /// Currency to convert from.
    pub base: String,
    /// Currency to convert to.
    pub target: String,
}

/// GET `/expenses` - Every expense, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Response, ApiError> {
    let expenses = state.workflow.list_expenses().await?;
    Ok((StatusCode::OK, Json(json!({ "data": expenses }))).into_response())
}

/// POST `/expenses` - Submit an expense for the session user.
async fn submit_expense(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewExpense>,
) -> Result<Response, ApiError> {
    let expense = state.workflow.submit_expense(payload, &session).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": expense }))).into_response())
}

/// POST `/expenses/preview` - Convert an amount without storing anything.
///
/// A missing rate is a normal answer (`available: false`), not an error.
async fn preview_conversion(
    State(state): State<AppState>,
    _session: CurrentSession,
    Json(payload): Json<PreviewRequest>,
) -> Response {
    let (Ok(base), Ok(target)) = (
        CurrencyCode::parse(&payload.base),
        CurrencyCode::parse(&payload.target),
    ) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Enter amount, base and target currencies",
        );
    };
    if payload.amount <= Decimal::ZERO {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Amount must be positive",
        );
    }

    let body = match state
        .workflow
        .preview_conversion(payload.amount, &base, &target)
        .await
    {
        Conversion::Available { converted, rate } => json!({
            "available": true,
            "amount": payload.amount,
            "base": base,
            "target": target,
            "converted": converted,
            "rate": rate,
        }),
        Conversion::Unavailable(reason) => json!({
            "available": false,
            "base": base,
            "target": target,
            "message": reason.message(),
        }),
    };

    (StatusCode::OK, Json(json!({ "data": body }))).into_response()
}
