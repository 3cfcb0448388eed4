use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;
pub mod users;

/// Token exchange and introspection; no bearer token required.
pub fn public_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/validate-token", post(auth::validate_token))
        .route("/api/auth/check-token", post(auth::check_token))
}

/// Endpoints behind the request gate.
pub fn protected_router() -> Router {
    Router::new()
        .route("/api/auth/me", get(system::me))
        .route("/api/users/:id", get(users::get_by_id))
        .route("/api/users/email/:email", get(users::get_by_email))
}
