//! Session cart route handlers.
//!
//! The cart lives in the visitor session. Every mutation re-renders the
//! cart panel fragment, which the page script swaps in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use jungle_park_core::{Cart, Lang, MenuItemId, Tenge};

use crate::error::Result;
use crate::middleware::{OptionalStaff, VisitorLang};
use crate::models::CurrentUser;
use crate::models::session::keys;
use crate::routes::PageCtx;
use crate::state::AppState;
use crate::store::MenuRepository;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the visitor's cart from the session, empty when absent.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// View Types
// =============================================================================

/// One cart line for the panel.
pub struct CartLineView {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart panel display data.
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub empty: bool,
    pub subtotal: String,
    pub delivery: String,
    pub delivery_free: bool,
    pub total: String,
    /// True while a small order would still pay the delivery fee.
    pub show_free_hint: bool,
    /// JSON the order form posts: `{"items": [...], "total": N}`.
    pub payload: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        let payload = json!({
            "items": cart.labels(),
            "total": totals.total.amount(),
        })
        .to_string();

        Self {
            lines: cart
                .entries()
                .iter()
                .map(|entry| CartLineView {
                    item_id: entry.item_id.to_string(),
                    name: entry.name.clone(),
                    quantity: entry.quantity,
                    line_total: entry.line_total().to_string(),
                })
                .collect(),
            empty: cart.is_empty(),
            subtotal: totals.subtotal.to_string(),
            delivery: totals.delivery.to_string(),
            delivery_free: totals.delivery == Tenge::ZERO,
            total: totals.total.to_string(),
            show_free_hint: totals.subtotal.is_positive()
                && totals.delivery != Tenge::ZERO,
            payload,
        }
    }
}

/// Cart panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartFragment {
    pub ctx: PageCtx,
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Form body for the cart mutation routes.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub item_id: MenuItemId,
}

/// Add one unit of a menu item to the cart.
///
/// POST /cart/add
#[instrument(skip(state, session, user))]
pub async fn add(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<CartFragment> {
    let mut cart = load_cart(&session).await?;

    // Unavailable or deleted items are silently skipped so a stale page
    // cannot grow the cart.
    match MenuRepository::new(state.store()).get(form.item_id).await? {
        Some(item) if item.available => {
            cart.add(item.id, item.title.get(lang), item.price);
            save_cart(&session, &cart).await?;
        }
        _ => {
            tracing::warn!(item_id = %form.item_id, "add to cart skipped unknown item");
        }
    }

    render(&state, lang, user, &cart).await
}

/// Add one more unit of an item already in the cart.
///
/// POST /cart/increment
#[instrument(skip(state, session, user))]
pub async fn increment(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<CartFragment> {
    let mut cart = load_cart(&session).await?;
    if cart.increment(form.item_id) {
        save_cart(&session, &cart).await?;
    }
    render(&state, lang, user, &cart).await
}

/// Remove one unit of an item; the line disappears at zero.
///
/// POST /cart/decrement
#[instrument(skip(state, session, user))]
pub async fn decrement(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<CartFragment> {
    let mut cart = load_cart(&session).await?;
    if cart.decrement(form.item_id) {
        save_cart(&session, &cart).await?;
    }
    render(&state, lang, user, &cart).await
}

async fn render(
    state: &AppState,
    lang: Lang,
    user: Option<CurrentUser>,
    cart: &Cart,
) -> Result<CartFragment> {
    Ok(CartFragment {
        ctx: PageCtx::load(state, lang, user).await?,
        cart: CartView::from(cart),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_with(prices: &[i64]) -> Cart {
        let mut cart = Cart::default();
        for (index, price) in prices.iter().enumerate() {
            cart.add(
                MenuItemId::generate(),
                format!("Позиция {index}"),
                Tenge::new(*price),
            );
        }
        cart
    }

    #[test]
    fn test_view_totals_with_delivery_fee() {
        let view = CartView::from(&cart_with(&[1500]));
        assert_eq!(view.subtotal, "1 500 ₸");
        assert_eq!(view.delivery, "500 ₸");
        assert_eq!(view.total, "2 000 ₸");
        assert!(view.show_free_hint);
        assert!(!view.delivery_free);
    }

    #[test]
    fn test_view_totals_at_free_delivery_threshold() {
        let view = CartView::from(&cart_with(&[1500, 3500]));
        assert_eq!(view.subtotal, "5 000 ₸");
        assert!(view.delivery_free);
        assert!(!view.show_free_hint);
        assert_eq!(view.total, "5 000 ₸");
    }

    #[test]
    fn test_view_payload_carries_labels_and_raw_total() {
        let mut cart = Cart::default();
        let id = MenuItemId::generate();
        cart.add(id, "Латте", Tenge::new(1500));
        cart.increment(id);

        let view = CartView::from(&cart);
        let payload: serde_json::Value = serde_json::from_str(&view.payload).unwrap();
        assert_eq!(payload["items"][0], "Латте ×2");
        assert_eq!(payload["total"], 3500);
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::from(&Cart::default());
        assert!(view.empty);
        assert!(view.lines.is_empty());
        assert!(!view.show_free_hint);
    }
}
