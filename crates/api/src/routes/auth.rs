//! Signup, login and logout.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use spendflow_core::directory::SignupInput;

use crate::AppState;
use crate::error::{ApiError, error_response};
use crate::middleware::CurrentSession;

/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Auth routes that need an active session.
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Country the company is registered in.
    pub country: String,
    /// Company name; blank falls back to `"<country> Company"`.
    #[serde(default)]
    pub company_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// POST `/auth/signup` - Register an admin and their company.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, ApiError> {
    if payload.email.trim().is_empty() || payload.name.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Name and email are required",
        ));
    }

    let session = state
        .accounts
        .signup(SignupInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            country: payload.country,
            company_name: payload.company_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "data": session }))).into_response())
}

/// POST `/auth/login` - Start a session.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    match state.accounts.login(&payload.email, &payload.password).await? {
        Some(session) => Ok((StatusCode::OK, Json(json!({ "data": session }))).into_response()),
        None => Ok(error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid credentials",
        )),
    }
}

/// POST `/auth/logout` - End the session.
async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.accounts.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/auth/me` - The active session.
async fn me(CurrentSession(session): CurrentSession) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "data": session })))
}
