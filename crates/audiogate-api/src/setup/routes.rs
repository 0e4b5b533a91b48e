//! Route configuration and setup

use crate::api_doc::get_openapi_spec;
use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use crate::utils::upload::MULTIPART_OVERHEAD_BYTES;
use audiogate_core::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = setup_cors(&state.config);
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs());

    public_routes()
        .merge(protected_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors),
        )
        .with_state(state)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping::ping))
        .route("/register", post(handlers::users::register))
        .route("/login", post(handlers::users::login))
        .route(
            "/api/openapi.json",
            get(|| async { Json(get_openapi_spec()) }),
        )
}

/// Routes behind the session guard.
///
/// `route_layer` keeps unmatched paths answering 404 instead of 401.
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Leave room for multipart framing so the handler sees the oversized
    // file and answers with its own error instead of a bare 413.
    let upload_body_limit = state.config.max_audio_size_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/audio/upload",
            post(handlers::audio::upload_audio).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/audio/{id}", get(handlers::audio::get_audio))
        .route("/users/me", get(handlers::users::current_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth_middleware,
        ))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
