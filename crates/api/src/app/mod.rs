//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder structure:
//! - `services.rs`: store wiring (in-memory vs Postgres)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use lifedrop_auth::Hs256TokenVerifier;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(services::build_services().await);
    build_app_with(services, jwt_secret)
}

/// Build the router around pre-constructed stores (used by tests to control
/// wiring deterministically).
pub fn build_app_with(services: Arc<services::AppServices>, jwt_secret: String) -> Router {
    let verifier = Arc::new(Hs256TokenVerifier::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { verifier };

    // Bearer-gated routes: token verification happens before any handler.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .merge(protected)
        .layer(Extension(services))
}
