pub mod config;
pub mod pages;
pub mod telemetry;

use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use pantry_core::{InstructionGenerator, RecipeStore};
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Everything a request needs, built once at startup.
#[derive(Debug)]
pub struct Pantry {
    pub store: RecipeStore,
    pub generator: InstructionGenerator,
}

/// Application state shared across all handlers
pub type AppState = Arc<Pantry>;

/// Build the application router with request tracing.
pub fn app(state: AppState) -> Router {
    pages::router().with_state(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    )
}
