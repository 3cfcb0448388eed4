//! HTTP API application wiring (Axum router + state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses and status mapping

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use wellness_auth::{AuthenticationFlow, TokenEngine, TokenValidator};
use wellness_core::{CredentialVerifier, UserDirectory};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Everything the handlers need. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub flow: AuthenticationFlow,
    pub validator: Arc<TokenValidator>,
    /// Read-only lookups for the user endpoints.
    pub directory: Arc<dyn UserDirectory>,
}

impl AppState {
    pub fn new(
        engine: TokenEngine,
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let flow = AuthenticationFlow::new(
            directory.clone(),
            verifier,
            engine.issuer,
            engine.validator.clone(),
        );
        Self {
            flow,
            validator: engine.validator,
            directory,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState) -> Router {
    let auth_state = middleware::AuthState {
        jwt: state.validator.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(state)))
}
