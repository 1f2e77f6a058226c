//! Admin panel route handlers.
//!
//! # Route Structure (all under `/admin`)
//!
//! ```text
//! GET  /                     - Login page
//! POST /                     - Login action
//! GET  /logout               - Clear the session identity
//! GET  /change-password      - Forced password change page
//! POST /change-password      - Password change action
//! GET  /dashboard            - Counts + recent notifications
//!
//! # Staff accounts (Administrator)
//! GET  /users                POST /users/create
//! POST /users/{id}/role      POST /users/{id}/delete
//!
//! # Menu (Administrator, Bartender)
//! GET  /menu                 POST /menu/create
//! POST /menu/{id}/update     POST /menu/{id}/delete
//!
//! # Programs (Administrator, Cashier)
//! GET  /programs             POST /programs/create
//! POST /programs/{id}/update POST /programs/{id}/delete
//!
//! # Banners (Administrator)
//! GET  /banners              POST /banners/create
//! POST /banners/{id}/update  POST /banners/{id}/delete
//!
//! # Switches (Administrator)
//! GET/POST /settings         GET/POST /maintenance
//! ```
//!
//! Mutations follow form-post-redirect: the POST redirects back to its
//! page with a `?success=` or `?error=` code, which the GET handler maps
//! to a localized message.

pub mod auth;
pub mod banners;
pub mod dashboard;
pub mod maintenance;
pub mod menu;
pub mod programs;
pub mod settings;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::routes::PageCtx;
use crate::state::AppState;

/// Build the admin router, nested under `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/change-password",
            get(auth::change_password_page).post(auth::change_password),
        )
        // Overview
        .route("/dashboard", get(dashboard::dashboard))
        // Staff accounts
        .route("/users", get(users::page))
        .route("/users/create", post(users::create))
        .route("/users/{id}/role", post(users::set_role))
        .route("/users/{id}/delete", post(users::delete))
        // Menu
        .route("/menu", get(menu::page))
        .route("/menu/create", post(menu::create))
        .route("/menu/{id}/update", post(menu::update))
        .route("/menu/{id}/delete", post(menu::delete))
        // Programs
        .route("/programs", get(programs::page))
        .route("/programs/create", post(programs::create))
        .route("/programs/{id}/update", post(programs::update))
        .route("/programs/{id}/delete", post(programs::delete))
        // Banners
        .route("/banners", get(banners::page))
        .route("/banners/create", post(banners::create))
        .route("/banners/{id}/update", post(banners::update))
        .route("/banners/{id}/delete", post(banners::delete))
        // Switches
        .route("/settings", get(settings::page).post(settings::update))
        .route(
            "/maintenance",
            get(maintenance::page).post(maintenance::update),
        )
}

// =============================================================================
// Flash Messages
// =============================================================================

/// Query parameters carrying a flash code after a redirect.
#[derive(Debug, Deserialize)]
pub struct FlashParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Map redirect query codes to localized flash texts.
///
/// Unknown codes fall through unchanged; the template escapes them.
pub fn flash_messages(params: &FlashParams, ctx: &PageCtx) -> (Option<String>, Option<String>) {
    let success = params.success.as_ref().map(|code| {
        match code.as_str() {
            "userCreated" => ctx.t("flash.userCreated"),
            "userUpdated" => ctx.t("flash.userUpdated"),
            "userDeleted" => ctx.t("flash.userDeleted"),
            "menuUpdated" => ctx.t("flash.menuUpdated"),
            "programUpdated" => ctx.t("flash.programUpdated"),
            "bannersUpdated" => ctx.t("flash.bannersUpdated"),
            "settingsUpdated" => ctx.t("flash.settingsUpdated"),
            "maintenanceUpdated" => ctx.t("flash.maintenanceUpdated"),
            "passwordUpdated" => ctx.t("flash.passwordUpdated"),
            other => other,
        }
        .to_owned()
    });

    let error = params.error.as_ref().map(|code| {
        match code.as_str() {
            "invalidCredentials" => ctx.t("flash.invalidCredentials"),
            "changePasswordPrompt" => ctx.t("flash.changePasswordPrompt"),
            "currentPasswordInvalid" => ctx.t("flash.currentPasswordInvalid"),
            "passwordTooShort" => ctx.t("flash.passwordTooShort"),
            "passwordMismatch" => ctx.t("flash.passwordMismatch"),
            "missingFields" => ctx.t("flash.missingFields"),
            "userExists" => ctx.t("flash.userExists"),
            "rootProtected" => ctx.t("flash.rootProtected"),
            "notFound" => ctx.t("flash.notFound"),
            "serverError" => ctx.t("flash.serverError"),
            other => other,
        }
        .to_owned()
    });

    (success, error)
}
