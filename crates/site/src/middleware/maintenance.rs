//! Maintenance mode gate.
//!
//! While `settings.maintenance` is set, public traffic is diverted to
//! the notice page. The admin panel, static assets, and the health
//! endpoint stay reachable so staff can turn the flag back off.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::state::AppState;
use crate::store::SettingsRepository;

/// Path prefixes that bypass the gate.
const EXEMPT_PREFIXES: [&str; 3] = ["/admin", "/static", "/health"];

/// Redirect public requests to `/maintenance` while the flag is set.
pub async fn maintenance_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let exempt =
        path == "/maintenance" || EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix));

    if !exempt {
        match SettingsRepository::new(state.store()).get().await {
            Ok(settings) if settings.maintenance => {
                return Redirect::to("/maintenance").into_response();
            }
            Ok(_) => {}
            // An unreadable settings file must not take the site down.
            Err(e) => {
                tracing::error!("Failed to read settings for maintenance gate: {e}");
            }
        }
    }

    next.run(request).await
}
