use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use wellness_auth::ErrorKind;
use wellness_core::{DirectoryError, Identity, IdentityId};

use crate::app::{AppState, errors};

/// `GET /api/users/:id`
pub async fn get_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let directory = state.directory.clone();
    let found = tokio::task::spawn_blocking(move || directory.find_by_id(&IdentityId::new(id))).await;
    respond(found)
}

/// `GET /api/users/email/:email`
pub async fn get_by_email(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
) -> axum::response::Response {
    let directory = state.directory.clone();
    let found = tokio::task::spawn_blocking(move || directory.find_by_email(&email)).await;
    respond(found)
}

fn respond(
    found: Result<Result<Option<Identity>, DirectoryError>, tokio::task::JoinError>,
) -> axum::response::Response {
    match found {
        Ok(Ok(Some(identity))) => Json(identity.summary()).into_response(),
        Ok(Ok(None)) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "user lookup failed");
            let kind = ErrorKind::DirectoryUnavailable;
            errors::json_error(errors::status_for(kind), kind.as_str(), e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "user lookup task failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "user lookup task failed",
            )
        }
    }
}
