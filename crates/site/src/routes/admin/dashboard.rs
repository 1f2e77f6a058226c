//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use jungle_park_core::Role;

use crate::error::Result;
use crate::middleware::{RequireStaff, VisitorLang};
use crate::models::notification::NotificationKind;
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::{
    BannerRepository, MenuRepository, NotificationLog, ProgramRepository, UserRepository,
};

/// How many notification log entries the dashboard shows.
const RECENT_NOTIFICATIONS: usize = 10;

/// One notification log row.
pub struct NotificationView {
    pub timestamp: String,
    pub kind: String,
    pub recipient: String,
    pub message: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub user_count: usize,
    pub menu_count: usize,
    pub program_count: usize,
    pub banner_count: usize,
    /// Recent log entries, Administrator only.
    pub notifications: Vec<NotificationView>,
    pub show_notifications: bool,
}

/// Display the admin overview.
///
/// GET /admin/dashboard
#[instrument(skip(state, user))]
pub async fn dashboard(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireStaff(user): RequireStaff,
    Query(params): Query<FlashParams>,
) -> Result<DashboardTemplate> {
    let store = state.store();
    let i18n = state.translations();

    let user_count = UserRepository::new(store).list().await?.len();
    let menu_count = MenuRepository::new(store).list().await?.len();
    let program_count = ProgramRepository::new(store).list().await?.len();
    let banner_count = BannerRepository::new(store).list().await?.len();

    let show_notifications = user.role.permits(Role::Administrator);
    let notifications = if show_notifications {
        NotificationLog::new(store)
            .recent(RECENT_NOTIFICATIONS)
            .await?
            .into_iter()
            .map(|entry| NotificationView {
                timestamp: entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                kind: i18n
                    .t(
                        lang,
                        match entry.kind {
                            NotificationKind::Order => "admin.kind.order",
                            NotificationKind::Program => "admin.kind.program",
                        },
                    )
                    .to_owned(),
                recipient: entry.recipient,
                message: entry.message,
            })
            .collect()
    } else {
        Vec::new()
    };

    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);

    Ok(DashboardTemplate {
        ctx,
        success_message,
        error_message,
        user_count,
        menu_count,
        program_count,
        banner_count,
        notifications,
        show_notifications,
    })
}
