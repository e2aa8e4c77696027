//! Session middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use spendflow_core::directory::Session;
use tracing::error;

use crate::AppState;
use crate::error::error_response;

/// Loads the active session and stores it in request extensions.
///
/// Responds 401 `no_session` when nobody is logged in.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.accounts.current_session().await {
        Ok(Some(session)) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Ok(None) => error_response(StatusCode::UNAUTHORIZED, "no_session", "Login required"),
        Err(e) => {
            error!(error = %e, "Failed to load session");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "Failed to load session",
            )
        }
    }
}

/// Extractor for the session loaded by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| {
                error_response(StatusCode::UNAUTHORIZED, "no_session", "Login required")
            })
    }
}
