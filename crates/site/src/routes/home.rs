//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use jungle_park_core::Lang;

use crate::error::Result;
use crate::middleware::{OptionalStaff, VisitorLang};
use crate::models::{Banner, MenuItem, Program};
use crate::routes::PageCtx;
use crate::state::AppState;
use crate::store::{BannerRepository, MenuRepository, ProgramRepository};

/// Number of menu items shown in the home page preview.
const MENU_PREVIEW_ITEMS: usize = 6;

// =============================================================================
// View Types
// =============================================================================

/// Banner display data for templates.
pub struct BannerView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Call-to-action label; only seasonal banners render a signup form.
    pub cta: String,
    pub seasonal: bool,
    /// Where a discount banner points, e.g. `/menu?add=<item id>`.
    pub menu_link: Option<String>,
}

impl BannerView {
    fn new(banner: &Banner, lang: Lang) -> Self {
        use crate::models::BannerKind;

        let (cta, seasonal, menu_link) = match &banner.kind {
            BannerKind::Seasonal { cta, .. } => (cta.get(lang).to_owned(), true, None),
            BannerKind::Discount { menu_item_id } => (
                String::new(),
                false,
                Some(format!("/menu?add={menu_item_id}")),
            ),
        };

        Self {
            id: banner.id.to_string(),
            title: banner.title.get(lang).to_owned(),
            description: banner.description.get(lang).to_owned(),
            cta,
            seasonal,
            menu_link,
        }
    }
}

/// Menu item teaser shown on the home page.
pub struct MenuTeaserView {
    pub title: String,
    pub price: String,
}

impl MenuTeaserView {
    fn new(item: &MenuItem, lang: Lang) -> Self {
        Self {
            title: item.title.get(lang).to_owned(),
            price: item.price.to_string(),
        }
    }
}

/// Program teaser shown on the home page.
pub struct ProgramTeaserView {
    pub title: String,
    pub price: String,
}

impl ProgramTeaserView {
    fn new(program: &Program, lang: Lang) -> Self {
        Self {
            title: program.title.get(lang).to_owned(),
            price: program.price.to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageCtx,
    pub banners: Vec<BannerView>,
    pub menu_preview: Vec<MenuTeaserView>,
    pub programs: Vec<ProgramTeaserView>,
}

// =============================================================================
// Handler
// =============================================================================

/// Display the home page.
///
/// GET /
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
) -> Result<HomeTemplate> {
    let store = state.store();

    let banners = BannerRepository::new(store).active().await?;
    let menu = MenuRepository::new(store).available().await?;
    let programs = ProgramRepository::new(store).available().await?;

    let ctx = PageCtx::load(&state, lang, user).await?;

    Ok(HomeTemplate {
        banners: banners.iter().map(|b| BannerView::new(b, lang)).collect(),
        menu_preview: menu
            .iter()
            .take(MENU_PREVIEW_ITEMS)
            .map(|i| MenuTeaserView::new(i, lang))
            .collect(),
        programs: programs
            .iter()
            .map(|p| ProgramTeaserView::new(p, lang))
            .collect(),
        ctx,
    })
}
