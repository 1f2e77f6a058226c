//! Banner management (Administrator only).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use jungle_park_core::{BannerId, LocalizedText, MenuItemId, ProgramId};

use crate::error::Result;
use crate::middleware::{RequireAdmin, VisitorLang};
use crate::models::banner::{Banner, BannerKind, default_cta};
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::{BannerRepository, MenuRepository, ProgramRepository, StoreError};

/// One banner row with its pre-filled edit form.
pub struct BannerRow {
    pub id: String,
    pub seasonal: bool,
    pub title_ru: String,
    pub title_kk: String,
    pub description_ru: String,
    pub description_kk: String,
    /// Selected program for a seasonal banner.
    pub program_id: String,
    /// Selected menu item for a discount banner.
    pub menu_item_id: String,
    pub cta_ru: String,
    pub cta_kk: String,
    pub active: bool,
}

impl From<&Banner> for BannerRow {
    fn from(banner: &Banner) -> Self {
        let (seasonal, program_id, menu_item_id, cta) = match &banner.kind {
            BannerKind::Seasonal { program_id, cta } => {
                (true, program_id.to_string(), String::new(), cta.clone())
            }
            BannerKind::Discount { menu_item_id } => (
                false,
                String::new(),
                menu_item_id.to_string(),
                LocalizedText::default(),
            ),
        };

        Self {
            id: banner.id.to_string(),
            seasonal,
            title_ru: banner.title.ru.clone(),
            title_kk: banner.title.kk.clone(),
            description_ru: banner.description.ru.clone(),
            description_kk: banner.description.kk.clone(),
            program_id,
            menu_item_id,
            cta_ru: cta.ru,
            cta_kk: cta.kk,
            active: banner.active,
        }
    }
}

/// Select option for the program / menu item pickers.
pub struct PickOption {
    pub id: String,
    pub title: String,
}

/// Banner management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/banners.html")]
pub struct AdminBannersTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub banners: Vec<BannerRow>,
    pub programs: Vec<PickOption>,
    pub menu_items: Vec<PickOption>,
}

/// Create/update form body.
#[derive(Debug, Deserialize)]
pub struct BannerForm {
    /// `seasonal` or `discount`.
    pub kind: String,
    pub title_ru: String,
    #[serde(default)]
    pub title_kk: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub description_kk: String,
    #[serde(default)]
    pub program_id: String,
    #[serde(default)]
    pub menu_item_id: String,
    #[serde(default)]
    pub cta_ru: String,
    #[serde(default)]
    pub cta_kk: String,
    #[serde(default)]
    pub active: Option<String>,
}

impl BannerForm {
    /// Parse into the stored kind plus shared fields, `None` when invalid.
    fn parse(&self) -> Option<(BannerKind, LocalizedText, LocalizedText, bool)> {
        let title_ru = self.title_ru.trim();
        if title_ru.is_empty() {
            return None;
        }

        let kind = match self.kind.as_str() {
            "seasonal" => {
                let program_id: ProgramId = self.program_id.trim().parse().ok()?;
                let cta_ru = self.cta_ru.trim();
                let cta_kk = self.cta_kk.trim();
                let cta = if cta_ru.is_empty() && cta_kk.is_empty() {
                    default_cta()
                } else {
                    LocalizedText::new(cta_ru, cta_kk)
                };
                BannerKind::Seasonal { program_id, cta }
            }
            "discount" => {
                let menu_item_id: MenuItemId = self.menu_item_id.trim().parse().ok()?;
                BannerKind::Discount { menu_item_id }
            }
            _ => return None,
        };

        Some((
            kind,
            LocalizedText::new(title_ru, self.title_kk.trim()),
            LocalizedText::new(self.description_ru.trim(), self.description_kk.trim()),
            self.active.is_some(),
        ))
    }
}

/// Display the banner management screen.
///
/// GET /admin/banners
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireAdmin(user): RequireAdmin,
    Query(params): Query<FlashParams>,
) -> Result<AdminBannersTemplate> {
    let store = state.store();

    let banners = BannerRepository::new(store)
        .list()
        .await?
        .iter()
        .map(BannerRow::from)
        .collect();
    let programs = ProgramRepository::new(store)
        .list()
        .await?
        .iter()
        .map(|p| PickOption {
            id: p.id.to_string(),
            title: p.title.ru.clone(),
        })
        .collect();
    let menu_items = MenuRepository::new(store)
        .list()
        .await?
        .iter()
        .map(|i| PickOption {
            id: i.id.to_string(),
            title: i.title.ru.clone(),
        })
        .collect();

    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);

    Ok(AdminBannersTemplate {
        ctx,
        success_message,
        error_message,
        banners,
        programs,
        menu_items,
    })
}

/// Add a banner.
///
/// POST /admin/banners/create
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<BannerForm>,
) -> Redirect {
    let Some((kind, title, description, active)) = form.parse() else {
        return Redirect::to("/admin/banners?error=missingFields");
    };

    let banner = Banner {
        id: BannerId::generate(),
        kind,
        title,
        description,
        active,
    };

    match BannerRepository::new(state.store()).create(banner).await {
        Ok(_) => Redirect::to("/admin/banners?success=bannersUpdated"),
        Err(error) => {
            tracing::error!("Failed to create banner: {error}");
            Redirect::to("/admin/banners?error=serverError")
        }
    }
}

/// Replace a banner.
///
/// POST /admin/banners/{id}/update
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<BannerForm>,
) -> Redirect {
    let Ok(banner_id) = id.parse::<BannerId>() else {
        return Redirect::to("/admin/banners?error=notFound");
    };
    let Some((kind, title, description, active)) = form.parse() else {
        return Redirect::to("/admin/banners?error=missingFields");
    };

    let banner = Banner {
        id: banner_id,
        kind,
        title,
        description,
        active,
    };

    match BannerRepository::new(state.store()).put(banner).await {
        Ok(()) => Redirect::to("/admin/banners?success=bannersUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/banners?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to update banner: {error}");
            Redirect::to("/admin/banners?error=serverError")
        }
    }
}

/// Delete a banner.
///
/// POST /admin/banners/{id}/delete
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Redirect {
    let Ok(banner_id) = id.parse::<BannerId>() else {
        return Redirect::to("/admin/banners?error=notFound");
    };

    match BannerRepository::new(state.store()).delete(banner_id).await {
        Ok(()) => Redirect::to("/admin/banners?success=bannersUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/banners?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to delete banner: {error}");
            Redirect::to("/admin/banners?error=serverError")
        }
    }
}
