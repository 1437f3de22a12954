use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Routing segregation (public vs. authenticated question surface).
pub mod routes;
use auth::AuthUser;
use routes::{public, questions};

// --- Public Re-exports ---

// Core state types for the binary entry point and the test suites.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Aggregates every `#[utoipa::path]` handler and `ToSchema` model into the
/// OpenAPI document served at `/api-docs/openapi.json` and rendered by the
/// Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_question,
        handlers::get_all_questions,
        handlers::edit_question,
        handlers::delete_question,
        handlers::get_questions_by_user,
        handlers::register_user,
    ),
    components(
        schemas(
            models::User,
            models::Question,
            models::CreateQuestionRequest,
            models::EditQuestionRequest,
            models::RegisterUserRequest,
            models::QuestionStatusResponse,
            models::QuestionDetailsResponse,
        )
    ),
    tags(
        (name = "qna-api", description = "Question management API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding the services every request
/// needs: the repository and the immutable configuration.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: persistence access behind the trait object.
    pub repo: RepositoryState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors (notably AuthUser) pull individual components out of the
// shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the question routes. `AuthUser` implements
/// `FromRequestParts`, so a failed extraction rejects the request with the
/// 401 `authorization_failed` body before the handler runs; no store access
/// has happened at that point.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies global and scoped middleware,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation: auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Question routes: nested under /question, behind the auth layer.
        .nest(
            "/question",
            questions::question_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                // Unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Wraps the request/response lifecycle in a tracing span that
                // carries the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Returns the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// request_span
///
/// Span factory for `TraceLayer`. Carries the method, URI, and the
/// `x-request-id` header (already injected by `SetRequestIdLayer`) so every
/// log line of a request shares one correlation id.
fn request_span(request: &axum::http::Request<axum::body::Body>) -> Span {
    let req_id = match request.headers().get("x-request-id") {
        Some(value) => value.to_str().unwrap_or("invalid"),
        None => "unknown",
    };

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        req_id = %req_id,
    )
}
