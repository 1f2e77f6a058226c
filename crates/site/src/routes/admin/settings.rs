//! Contact numbers and the owner authorization switch (Administrator only).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{RequireAdmin, VisitorLang};
use crate::models::Settings;
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::SettingsRepository;

/// Settings template; the form fields come from `ctx.settings`.
#[derive(Template, WebTemplate)]
#[template(path = "admin/settings.html")]
pub struct AdminSettingsTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Settings form body.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub cafe_number: String,
    pub cashier_number: String,
    #[serde(default)]
    pub owner_authorized: Option<String>,
}

/// Display the settings screen.
///
/// GET /admin/settings
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireAdmin(user): RequireAdmin,
    Query(params): Query<FlashParams>,
) -> Result<AdminSettingsTemplate> {
    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);
    Ok(AdminSettingsTemplate {
        ctx,
        success_message,
        error_message,
    })
}

/// Save the contact numbers and the owner switch.
///
/// POST /admin/settings
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    let cafe_number = form.cafe_number.trim();
    let cashier_number = form.cashier_number.trim();
    if cafe_number.is_empty() || cashier_number.is_empty() {
        return Redirect::to("/admin/settings?error=missingFields");
    }

    let repo = SettingsRepository::new(state.store());

    // The maintenance flag lives on its own screen; carry it over.
    let current = match repo.get().await {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("Failed to read settings: {error}");
            return Redirect::to("/admin/settings?error=serverError");
        }
    };

    let updated = Settings {
        owner_authorized: form.owner_authorized.is_some(),
        cafe_number: cafe_number.to_owned(),
        cashier_number: cashier_number.to_owned(),
        maintenance: current.maintenance,
    };

    match repo.put(&updated).await {
        Ok(()) => Redirect::to("/admin/settings?success=settingsUpdated"),
        Err(error) => {
            tracing::error!("Failed to save settings: {error}");
            Redirect::to("/admin/settings?error=serverError")
        }
    }
}
