//! Menu management (Administrator or Bartender).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use jungle_park_core::{LocalizedText, MenuItemId, Tenge};

use crate::error::Result;
use crate::middleware::{RequireMenuStaff, VisitorLang};
use crate::models::MenuItem;
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::{MenuRepository, StoreError};

/// One menu item row with its pre-filled edit form.
pub struct MenuRow {
    pub id: String,
    pub title_ru: String,
    pub title_kk: String,
    pub description_ru: String,
    pub description_kk: String,
    pub price: i64,
    pub available: bool,
}

impl From<&MenuItem> for MenuRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            title_ru: item.title.ru.clone(),
            title_kk: item.title.kk.clone(),
            description_ru: item.description.ru.clone(),
            description_kk: item.description.kk.clone(),
            price: item.price.amount(),
            available: item.available,
        }
    }
}

/// Menu management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menu.html")]
pub struct AdminMenuTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub items: Vec<MenuRow>,
}

/// Create/update form body. Checkboxes arrive as `on` or not at all.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub title_ru: String,
    #[serde(default)]
    pub title_kk: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub description_kk: String,
    pub price: String,
    #[serde(default)]
    pub available: Option<String>,
}

impl MenuItemForm {
    /// Parse the form into the stored fields, `None` when invalid.
    fn parse(&self) -> Option<(LocalizedText, LocalizedText, Tenge, bool)> {
        let title_ru = self.title_ru.trim();
        if title_ru.is_empty() {
            return None;
        }
        let price: i64 = self.price.trim().parse().ok()?;
        if price < 0 {
            return None;
        }
        Some((
            LocalizedText::new(title_ru, self.title_kk.trim()),
            LocalizedText::new(self.description_ru.trim(), self.description_kk.trim()),
            Tenge::new(price),
            self.available.is_some(),
        ))
    }
}

/// Display the menu management screen.
///
/// GET /admin/menu
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireMenuStaff(user): RequireMenuStaff,
    Query(params): Query<FlashParams>,
) -> Result<AdminMenuTemplate> {
    let items = MenuRepository::new(state.store())
        .list()
        .await?
        .iter()
        .map(MenuRow::from)
        .collect();

    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);

    Ok(AdminMenuTemplate {
        ctx,
        success_message,
        error_message,
        items,
    })
}

/// Add a menu item.
///
/// POST /admin/menu/create
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireMenuStaff(_user): RequireMenuStaff,
    Form(form): Form<MenuItemForm>,
) -> Redirect {
    let Some((title, description, price, available)) = form.parse() else {
        return Redirect::to("/admin/menu?error=missingFields");
    };

    let item = MenuItem {
        id: MenuItemId::generate(),
        title,
        description,
        price,
        available,
    };

    match MenuRepository::new(state.store()).create(item).await {
        Ok(_) => Redirect::to("/admin/menu?success=menuUpdated"),
        Err(error) => {
            tracing::error!("Failed to create menu item: {error}");
            Redirect::to("/admin/menu?error=serverError")
        }
    }
}

/// Replace a menu item.
///
/// POST /admin/menu/{id}/update
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireMenuStaff(_user): RequireMenuStaff,
    Path(id): Path<String>,
    Form(form): Form<MenuItemForm>,
) -> Redirect {
    let Ok(item_id) = id.parse::<MenuItemId>() else {
        return Redirect::to("/admin/menu?error=notFound");
    };
    let Some((title, description, price, available)) = form.parse() else {
        return Redirect::to("/admin/menu?error=missingFields");
    };

    let item = MenuItem {
        id: item_id,
        title,
        description,
        price,
        available,
    };

    match MenuRepository::new(state.store()).put(item).await {
        Ok(()) => Redirect::to("/admin/menu?success=menuUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/menu?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to update menu item: {error}");
            Redirect::to("/admin/menu?error=serverError")
        }
    }
}

/// Delete a menu item.
///
/// POST /admin/menu/{id}/delete
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireMenuStaff(_user): RequireMenuStaff,
    Path(id): Path<String>,
) -> Redirect {
    let Ok(item_id) = id.parse::<MenuItemId>() else {
        return Redirect::to("/admin/menu?error=notFound");
    };

    match MenuRepository::new(state.store()).delete(item_id).await {
        Ok(()) => Redirect::to("/admin/menu?success=menuUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/menu?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to delete menu item: {error}");
            Redirect::to("/admin/menu?error=serverError")
        }
    }
}
