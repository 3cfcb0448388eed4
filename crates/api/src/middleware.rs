use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use wellness_auth::{ErrorKind, JwtValidator};

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Request gate: `Authorization: Bearer <token>` must verify, otherwise 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            ErrorKind::EmptyOrNullInput.as_str(),
            "missing bearer token",
        );
    };

    let claims = match state.jwt.verify(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            return json_error(StatusCode::UNAUTHORIZED, e.kind().as_str(), e.to_string());
        }
    };

    req.extensions_mut()
        .insert(PrincipalContext::from_claims(claims));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
