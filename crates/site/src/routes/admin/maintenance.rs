//! Maintenance mode switch (Administrator only).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{RequireAdmin, VisitorLang};
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::SettingsRepository;

/// Maintenance switch template; the current flag comes from `ctx.settings`.
#[derive(Template, WebTemplate)]
#[template(path = "admin/maintenance.html")]
pub struct AdminMaintenanceTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Maintenance form body.
#[derive(Debug, Deserialize)]
pub struct MaintenanceForm {
    #[serde(default)]
    pub maintenance: Option<String>,
}

/// Display the maintenance switch.
///
/// GET /admin/maintenance
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireAdmin(user): RequireAdmin,
    Query(params): Query<FlashParams>,
) -> Result<AdminMaintenanceTemplate> {
    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);
    Ok(AdminMaintenanceTemplate {
        ctx,
        success_message,
        error_message,
    })
}

/// Flip the maintenance flag.
///
/// POST /admin/maintenance
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<MaintenanceForm>,
) -> Redirect {
    let enabled = form.maintenance.is_some();
    match SettingsRepository::new(state.store())
        .set_maintenance(enabled)
        .await
    {
        Ok(_) => {
            tracing::info!(enabled, "maintenance mode switched");
            Redirect::to("/admin/maintenance?success=maintenanceUpdated")
        }
        Err(error) => {
            tracing::error!("Failed to switch maintenance mode: {error}");
            Redirect::to("/admin/maintenance?error=serverError")
        }
    }
}
