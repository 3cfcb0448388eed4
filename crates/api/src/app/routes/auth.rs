use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use wellness_auth::{AuthError, Authenticated};

use crate::app::{AppState, dto, errors};

pub async fn login(
    Extension(state): Extension<AppState>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if let Err(res) = body.validate() {
        return res;
    }

    // Directory lookups and password hashing may block.
    let flow = state.flow.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        flow.authenticate(body.username.trim(), &body.password, Utc::now())
    })
    .await;

    respond(outcome)
}

pub async fn refresh(
    Extension(state): Extension<AppState>,
    Json(body): Json<dto::RefreshRequest>,
) -> axum::response::Response {
    if body.refresh_token.trim().is_empty() {
        return errors::validation_error("refresh_token is required");
    }

    let flow = state.flow.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        flow.refresh(body.refresh_token.trim(), Utc::now())
    })
    .await;

    respond(outcome)
}

/// Detailed introspection. 200 when valid, 401 with the same body otherwise.
pub async fn validate_token(
    Extension(state): Extension<AppState>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    if let Err(res) = body.validate() {
        return res;
    }

    let result = state.validator.validate(body.bare_token(), Utc::now());
    let status = if result.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    (status, Json(dto::ValidationResponse::from(result))).into_response()
}

pub async fn check_token(
    Extension(state): Extension<AppState>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    if let Err(res) = body.validate() {
        return res;
    }

    let valid = state.validator.is_token_valid(body.bare_token(), Utc::now());
    Json(dto::CheckResponse::new(valid)).into_response()
}

fn respond(
    outcome: Result<Result<Authenticated, AuthError>, tokio::task::JoinError>,
) -> axum::response::Response {
    match outcome {
        Ok(Ok(auth)) => Json(dto::AuthResponse::from(auth)).into_response(),
        Ok(Err(e)) => errors::auth_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "authentication task failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "authentication task failed",
            )
        }
    }
}
