use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use wellness_auth::{AuthError, ErrorKind};

/// HTTP status for an engine error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MalformedToken
        | ErrorKind::BadSignature
        | ErrorKind::UnsupportedAlgorithm
        | ErrorKind::EmptyOrNullInput
        | ErrorKind::TokenExpired
        | ErrorKind::IdentityNotFound
        | ErrorKind::IdentityInactive
        | ErrorKind::BadCredentials
        | ErrorKind::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
        ErrorKind::DirectoryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ConfigurationError | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    let kind = err.kind();
    let status = status_for(kind);
    if status.is_server_error() {
        tracing::error!(error = %err, "authentication exchange failed");
    }
    json_error(status, kind.as_str(), err.to_string())
}

pub fn validation_error(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
