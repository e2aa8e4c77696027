//! User administration.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use spendflow_core::directory::{Company, Role, User};

use crate::AppState;
use crate::error::{ApiError, error_response};
use crate::middleware::CurrentSession;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}

/// Request body for adding a member to the session's company.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// `admin`, `manager` or `employee`.
    pub role: String,
}

/// A user without their password.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Company, if any.
    pub company: Option<Company>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            role: user.role,
            company: user.company,
        }
    }
}

/// GET `/users` - Every registered user.
async fn list_users(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Response, ApiError> {
    let users: Vec<UserResponse> = state
        .accounts
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok((StatusCode::OK, Json(json!({ "data": users }))).into_response())
}

/// POST `/users` - Add a member with the default password.
async fn create_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let Some(role) = Role::parse(&payload.role) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            format!("Unknown role '{}'", payload.role),
        ));
    };

    let user = state
        .accounts
        .add_member(&session, &payload.name, &payload.email, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": UserResponse::from(user) })),
    )
        .into_response())
}
