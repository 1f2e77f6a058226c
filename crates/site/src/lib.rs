//! Jungle Park site library.
//!
//! This crate provides the café site as a library so the binary, the
//! operational CLI, and the integration tests can all build the same
//! application.
//!
//! The public surface is small: [`state::AppState`] holds config, store,
//! and translations; [`bootstrap`] prepares the data directory; [`app`]
//! assembles the full router with its middleware stack.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::config::exposed_root_password;
use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::store::SettingsRepository;

/// Prepare the data directory for serving.
///
/// Makes sure `settings.json` exists and the `root` administrator
/// account is present. Returns `true` when the root account was created
/// on this call, so the caller can log the initial credentials hint.
///
/// # Errors
///
/// Returns an error if the data directory is not writable or a data
/// file is corrupt.
pub async fn bootstrap(state: &AppState) -> Result<bool, AppError> {
    SettingsRepository::new(state.store()).ensure_exists().await?;

    let created = AuthService::new(state.store())
        .ensure_root_account(exposed_root_password(state.config()))
        .await?;

    Ok(created)
}

/// Build the application router.
///
/// Middleware order (outermost first): request tracing, sessions,
/// maintenance gate. Static assets are served from the crate's
/// `static/` directory relative to the workspace root.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/site/static"))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::maintenance_gate,
        ))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the data
/// directory.
async fn health() -> &'static str {
    "ok"
}
