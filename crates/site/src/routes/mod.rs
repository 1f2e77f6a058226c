//! HTTP route handlers for the café site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (banners, menu preview, programs)
//! GET  /health                  - Health check
//! GET  /maintenance             - Maintenance notice
//!
//! # Public pages
//! GET  /menu                    - Menu with cart panel (?add=<id> adds first)
//! GET  /programs                - Program listing with booking forms
//!
//! # Cart (session-backed fragments)
//! POST /cart/add                - Add a menu item (returns cart fragment)
//! POST /cart/increment          - One more unit of an item (fragment)
//! POST /cart/decrement          - One unit less, entry gone at zero (fragment)
//!
//! # Visitor API (JSON)
//! POST /api/order               - Submit a delivery order
//! POST /api/program-request     - Ask for a program booking
//! POST /api/banner-signup/{id}  - Sign up through a seasonal banner
//!
//! # Admin panel (session auth, role-gated)
//! GET  /admin                   - Login page
//! POST /admin                   - Login action
//! GET  /admin/logout            - Logout
//! GET  /admin/change-password   - Forced password change page
//! POST /admin/change-password   - Password change action
//! GET  /admin/dashboard         - Overview
//! GET  /admin/users             - Staff accounts (Administrator)
//! GET  /admin/menu              - Menu management (Administrator, Bartender)
//! GET  /admin/programs          - Program management (Administrator, Cashier)
//! GET  /admin/banners           - Banner management (Administrator)
//! GET  /admin/settings          - Numbers + owner switch (Administrator)
//! GET  /admin/maintenance       - Maintenance switch (Administrator)
//! ```
//!
//! Admin mutation routes are listed in [`admin`].

pub mod admin;
pub mod api;
pub mod cart;
pub mod home;
pub mod maintenance;
pub mod menu;
pub mod programs;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use jungle_park_core::{Lang, Role};

use crate::error::Result;
use crate::i18n::Translations;
use crate::middleware::VisitorLang;
use crate::models::{CurrentUser, Settings};
use crate::state::AppState;
use crate::store::SettingsRepository;

/// Context shared by every rendered page: language, translation table,
/// site settings and the logged-in staff member, if any.
#[derive(Debug, Clone)]
pub struct PageCtx {
    pub lang: Lang,
    pub i18n: Translations,
    pub settings: Settings,
    pub user: Option<CurrentUser>,
    /// Year for the footer.
    pub year: i32,
}

impl PageCtx {
    /// Assemble the context for the current request.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings document cannot be read.
    pub async fn load(
        state: &AppState,
        lang: Lang,
        user: Option<CurrentUser>,
    ) -> Result<Self> {
        use chrono::Datelike;

        let settings = SettingsRepository::new(state.store()).get().await?;
        Ok(Self {
            lang,
            i18n: state.translations().clone(),
            settings,
            user,
            year: chrono::Utc::now().year(),
        })
    }

    /// Look up a translation in the visitor's language.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.i18n.t(self.lang, key)
    }

    /// The language the switcher should offer.
    #[must_use]
    pub const fn other_lang(&self) -> Lang {
        match self.lang {
            Lang::Ru => Lang::Kk,
            Lang::Kk => Lang::Ru,
        }
    }

    /// True when the signed-in staff member may manage the menu.
    #[must_use]
    pub fn can_manage_menu(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role.permits(Role::Bartender))
    }

    /// True when the signed-in staff member may manage programs and banners.
    #[must_use]
    pub fn can_manage_programs(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role.permits(Role::Cashier))
    }

    /// True for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role.permits(Role::Administrator))
    }
}

/// Standalone localized error page (403, 404).
#[derive(Template, WebTemplate)]
#[template(path = "errors/error.html")]
pub struct ErrorPage {
    pub lang: Lang,
    pub title: String,
    pub body: String,
    pub back: String,
}

impl ErrorPage {
    /// Page shown when a role check fails.
    #[must_use]
    pub fn forbidden(lang: Lang, i18n: &Translations) -> Self {
        Self {
            lang,
            title: i18n.t(lang, "error.forbidden_title").to_owned(),
            body: i18n.t(lang, "error.forbidden_body").to_owned(),
            back: i18n.t(lang, "error.back_home").to_owned(),
        }
    }

    /// Page shown for unknown paths.
    #[must_use]
    pub fn not_found(lang: Lang, i18n: &Translations) -> Self {
        Self {
            lang,
            title: i18n.t(lang, "error.not_found_title").to_owned(),
            body: i18n.t(lang, "error.not_found_body").to_owned(),
            back: i18n.t(lang, "error.back_home").to_owned(),
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
}

/// Create the visitor API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(api::order))
        .route("/program-request", post(api::program_request))
        .route("/banner-signup/{banner_id}", post(api::banner_signup))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(home::home))
        .route("/menu", get(menu::menu))
        .route("/programs", get(programs::programs))
        .route("/maintenance", get(maintenance::notice))
        // Cart fragments
        .nest("/cart", cart_routes())
        // Visitor API
        .nest("/api", api_routes())
        // Admin panel
        .nest("/admin", admin::router())
        // Localized 404 for everything else
        .fallback(fallback)
}

/// Render the localized 404 page for unknown paths.
async fn fallback(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
) -> (StatusCode, ErrorPage) {
    (
        StatusCode::NOT_FOUND,
        ErrorPage::not_found(lang, state.translations()),
    )
}
