use crate::{AppState, handlers};
use axum::{Router, routing::{get, post}};

/// Public Router Module
///
/// Endpoints that require no session: the liveness probe and user
/// registration. Everything that reads or mutates questions lives in the
/// authenticated `questions` module instead.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness check for monitors and load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /user/register
        // Creates a profile row. Tokens themselves are issued by the
        // identity layer, not by this service.
        .route("/user/register", post(handlers::register_user))
}
