//! Shopfront Storefront library.
//!
//! This crate provides the storefront as a library so the router can be
//! driven in-process by tests and served by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    routes::routes()
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
