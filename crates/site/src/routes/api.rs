//! Visitor-facing JSON API.
//!
//! All three endpoints answer `{"message": <localized text>}` with the
//! status carrying the outcome. Field validation happens first; while
//! `settings.owner_authorized` is off every request is rejected before
//! anything reaches the notification log.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use jungle_park_core::{BannerId, Cart, Lang, ProgramId};

use crate::error::ApiMessage;
use crate::middleware::VisitorLang;
use crate::models::Settings;
use crate::routes::cart::save_cart;
use crate::services::notify::{Notifier, OrderNotice, ProgramNotice, SignupNotice};
use crate::state::AppState;
use crate::store::{BannerRepository, ProgramRepository, SettingsRepository};

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of `POST /api/order`.
#[derive(Debug, Deserialize)]
pub struct OrderBody {
    pub address: String,
    pub phone: String,
    pub total: i64,
    pub items: Vec<String>,
}

/// Body of `POST /api/program-request`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRequestBody {
    pub program_id: String,
    pub name: String,
    pub child_name: String,
    pub date: String,
    pub phone: String,
}

/// Body of `POST /api/banner-signup/{banner_id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerSignupBody {
    pub child_name: String,
    pub parent_name: String,
    pub age: String,
    pub phone: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a delivery order composed from the cart panel.
///
/// POST /api/order
#[instrument(skip(state, session, body))]
pub async fn order(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    session: Session,
    Json(body): Json<OrderBody>,
) -> ApiMessage {
    let i18n = state.translations();

    let address = body.address.trim();
    let phone = body.phone.trim();
    if address.is_empty() || phone.is_empty() || body.total <= 0 {
        return ApiMessage::bad_request(i18n.t(lang, "error.missing_fields"));
    }
    let items: Vec<String> = body
        .items
        .iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        return ApiMessage::bad_request(i18n.t(lang, "order.cart_empty"));
    }

    let settings = match authorized_settings(&state, lang).await {
        Ok(settings) => settings,
        Err(rejection) => return rejection,
    };

    let notice = OrderNotice {
        items: &items,
        total: body.total,
        address,
        phone,
    };
    if let Err(error) = Notifier::new(state.store()).order(&settings, notice).await {
        tracing::error!("Failed to record order notification: {error}");
        return ApiMessage::server_error(i18n.t(lang, "error.server"));
    }

    // The order took the cart's contents with it.
    if let Err(error) = save_cart(&session, &Cart::default()).await {
        tracing::warn!("Failed to clear session cart after order: {error}");
    }

    ApiMessage::ok(i18n.t(lang, "order.received"))
}

/// Ask for a program booking.
///
/// POST /api/program-request
#[instrument(skip(state, body))]
pub async fn program_request(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    Json(body): Json<ProgramRequestBody>,
) -> ApiMessage {
    let i18n = state.translations();

    let name = body.name.trim();
    let child_name = body.child_name.trim();
    let date = body.date.trim();
    let phone = body.phone.trim();
    if name.is_empty() || child_name.is_empty() || date.is_empty() || phone.is_empty() {
        return ApiMessage::bad_request(i18n.t(lang, "error.missing_fields"));
    }

    let settings = match authorized_settings(&state, lang).await {
        Ok(settings) => settings,
        Err(rejection) => return rejection,
    };

    // An unparseable id cannot name a stored program.
    let Ok(program_id) = body.program_id.trim().parse::<ProgramId>() else {
        return ApiMessage::not_found(i18n.t(lang, "error.program_not_found"));
    };
    let program = match ProgramRepository::new(state.store()).get(program_id).await {
        Ok(Some(program)) => program,
        Ok(None) => {
            return ApiMessage::not_found(i18n.t(lang, "error.program_not_found"));
        }
        Err(error) => {
            tracing::error!("Failed to read programs: {error}");
            return ApiMessage::server_error(i18n.t(lang, "error.server"));
        }
    };

    let notice = ProgramNotice {
        program_id,
        title: program.title.get(lang),
        name,
        child_name,
        date,
        phone,
    };
    if let Err(error) = Notifier::new(state.store())
        .program_request(&settings, notice)
        .await
    {
        tracing::error!("Failed to record program request: {error}");
        return ApiMessage::server_error(i18n.t(lang, "error.server"));
    }

    ApiMessage::ok(i18n.t(lang, "program.received"))
}

/// Sign a child up through a seasonal banner.
///
/// POST /api/banner-signup/{banner_id}
#[instrument(skip(state, body))]
pub async fn banner_signup(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    Path(banner_id): Path<String>,
    Json(body): Json<BannerSignupBody>,
) -> ApiMessage {
    let i18n = state.translations();

    let child_name = body.child_name.trim();
    let parent_name = body.parent_name.trim();
    let age = body.age.trim();
    let phone = body.phone.trim();
    if child_name.is_empty() || parent_name.is_empty() || age.is_empty() || phone.is_empty() {
        return ApiMessage::bad_request(i18n.t(lang, "error.missing_fields"));
    }

    let settings = match authorized_settings(&state, lang).await {
        Ok(settings) => settings,
        Err(rejection) => return rejection,
    };

    let Ok(banner_id) = banner_id.parse::<BannerId>() else {
        return ApiMessage::not_found(i18n.t(lang, "error.banner_not_found"));
    };
    let banner = match BannerRepository::new(state.store()).get(banner_id).await {
        // Only seasonal banners carry a signup form.
        Ok(Some(banner)) if banner.is_seasonal() => banner,
        Ok(_) => {
            return ApiMessage::not_found(i18n.t(lang, "error.banner_not_found"));
        }
        Err(error) => {
            tracing::error!("Failed to read banners: {error}");
            return ApiMessage::server_error(i18n.t(lang, "error.server"));
        }
    };

    let notice = SignupNotice {
        banner_id,
        title: banner.title.get(lang),
        child_name,
        parent_name,
        age,
        phone,
    };
    if let Err(error) = Notifier::new(state.store())
        .banner_signup(&settings, notice)
        .await
    {
        tracing::error!("Failed to record banner signup: {error}");
        return ApiMessage::server_error(i18n.t(lang, "error.server"));
    }

    ApiMessage::ok(i18n.t(lang, "signup.received"))
}

// =============================================================================
// Helpers
// =============================================================================

/// Read the settings and enforce the owner switch.
///
/// While the switch is off nothing may reach the notification log, so
/// callers return the rejection as-is.
async fn authorized_settings(state: &AppState, lang: Lang) -> Result<Settings, ApiMessage> {
    let i18n = state.translations();

    let settings = match SettingsRepository::new(state.store()).get().await {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("Failed to read settings: {error}");
            return Err(ApiMessage::server_error(i18n.t(lang, "error.server")));
        }
    };
    if !settings.owner_authorized {
        return Err(ApiMessage::forbidden(i18n.t(lang, "error.not_authorized")));
    }
    Ok(settings)
}
