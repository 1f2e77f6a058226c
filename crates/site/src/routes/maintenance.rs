//! Maintenance notice route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::VisitorLang;
use crate::routes::PageCtx;
use crate::state::AppState;

/// Standalone maintenance notice.
#[derive(Template, WebTemplate)]
#[template(path = "maintenance.html")]
pub struct MaintenanceTemplate {
    pub ctx: PageCtx,
}

/// Display the maintenance notice.
///
/// GET /maintenance
///
/// The gate in [`crate::middleware::maintenance`] sends visitors here
/// while the flag is set; the page itself renders regardless so a direct
/// visit after the flag is cleared still works.
#[instrument(skip(state))]
pub async fn notice(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
) -> Result<MaintenanceTemplate> {
    Ok(MaintenanceTemplate {
        ctx: PageCtx::load(&state, lang, None).await?,
    })
}
