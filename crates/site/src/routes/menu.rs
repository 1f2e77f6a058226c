//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use jungle_park_core::{Lang, MenuItemId};

use crate::error::Result;
use crate::middleware::{OptionalStaff, VisitorLang};
use crate::models::MenuItem;
use crate::routes::PageCtx;
use crate::routes::cart::{CartView, load_cart, save_cart};
use crate::state::AppState;
use crate::store::MenuRepository;

/// Menu item display data.
pub struct MenuItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

impl MenuItemView {
    fn new(item: &MenuItem, lang: Lang) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.get(lang).to_owned(),
            description: item.description.get(lang).to_owned(),
            price: item.price.to_string(),
        }
    }
}

/// Menu page template with the cart panel.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub ctx: PageCtx,
    pub items: Vec<MenuItemView>,
    pub cart: CartView,
}

/// Query parameters for the menu page.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Item to drop into the cart before rendering, used by banner links.
    pub add: Option<String>,
}

/// Display the menu with the visitor's cart.
///
/// GET /menu
///
/// `?add=<item id>` adds one unit first and redirects back to the clean
/// URL so a refresh does not add the item again.
#[instrument(skip(state, session, user))]
pub async fn menu(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<Response> {
    let repo = MenuRepository::new(state.store());

    if let Some(raw) = query.add {
        if let Ok(item_id) = raw.parse::<MenuItemId>() {
            if let Some(item) = repo.get(item_id).await?.filter(|i| i.available) {
                let mut cart = load_cart(&session).await?;
                cart.add(item.id, item.title.get(lang), item.price);
                save_cart(&session, &cart).await?;
            }
        }
        return Ok(Redirect::to("/menu").into_response());
    }

    let items = repo.available().await?;
    let cart = load_cart(&session).await?;

    let page = MenuTemplate {
        ctx: PageCtx::load(&state, lang, user).await?,
        items: items.iter().map(|i| MenuItemView::new(i, lang)).collect(),
        cart: CartView::from(&cart),
    };
    Ok(page.into_response())
}
