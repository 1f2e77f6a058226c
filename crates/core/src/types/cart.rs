//! Shopping cart state machine and delivery pricing.
//!
//! The cart lives in the visitor session; handlers mutate it through the
//! operations here and re-render the cart view after every change. All
//! pricing rules live in this module so they can be tested without a
//! running server.

use serde::{Deserialize, Serialize};

use crate::types::id::MenuItemId;
use crate::types::price::Tenge;

/// Delivery surcharge applied to small orders.
pub const DELIVERY_FEE: Tenge = Tenge::new(500);

/// Subtotal from which delivery becomes free.
pub const FREE_DELIVERY_FROM: Tenge = Tenge::new(5000);

/// One selected menu item with its quantity.
///
/// Name and unit price are snapshots taken when the item was added, so a
/// concurrent menu edit does not change a cart the visitor already built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: Tenge,
    pub quantity: u32,
}

impl CartEntry {
    /// Price of this line, unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Tenge {
        self.unit_price.times(self.quantity)
    }

    /// Human-readable line label, e.g. `Латте ×2`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.quantity == 1 {
            self.name.clone()
        } else {
            format!("{} ×{}", self.name, self.quantity)
        }
    }
}

/// Computed cart pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Tenge,
    pub delivery: Tenge,
    pub total: Tenge,
}

/// The set of selected items with quantities.
///
/// Quantities are always at least 1; decrementing the last unit removes
/// the entry entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Add one unit of an item.
    ///
    /// Increments the quantity when the item is already in the cart,
    /// otherwise inserts a new entry with quantity 1.
    pub fn add(&mut self, item_id: MenuItemId, name: impl Into<String>, unit_price: Tenge) {
        if let Some(entry) = self.entry_mut(item_id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                item_id,
                name: name.into(),
                unit_price,
                quantity: 1,
            });
        }
    }

    /// Add one unit of an item already in the cart.
    ///
    /// Returns `false` when the item is not present.
    pub fn increment(&mut self, item_id: MenuItemId) -> bool {
        match self.entry_mut(item_id) {
            Some(entry) => {
                entry.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Remove one unit of an item; the entry disappears at quantity 0.
    ///
    /// Returns `false` when the item is not present.
    pub fn decrement(&mut self, item_id: MenuItemId) -> bool {
        let Some(entry) = self.entry_mut(item_id) else {
            return false;
        };
        if entry.quantity > 1 {
            entry.quantity -= 1;
        } else {
            self.entries.retain(|e| e.item_id != item_id);
        }
        true
    }

    /// Drop everything, used after a submitted order.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line labels for the order payload, e.g. `["Латте ×2", "Чизкейк"]`.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(CartEntry::label).collect()
    }

    /// Subtotal, delivery fee and grand total for the current contents.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Tenge = self.entries.iter().map(CartEntry::line_total).sum();
        let delivery = delivery_fee(subtotal);
        CartTotals {
            subtotal,
            delivery,
            total: subtotal + delivery,
        }
    }

    fn entry_mut(&mut self, item_id: MenuItemId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.item_id == item_id)
    }
}

/// Delivery fee rule: the fixed surcharge applies to orders below
/// [`FREE_DELIVERY_FROM`]; an empty cart and orders at or above the
/// threshold pay nothing.
#[must_use]
pub fn delivery_fee(subtotal: Tenge) -> Tenge {
    if subtotal.is_positive() && subtotal < FREE_DELIVERY_FROM {
        DELIVERY_FEE
    } else {
        Tenge::ZERO
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: i64) -> (MenuItemId, Tenge) {
        (MenuItemId::generate(), Tenge::new(price))
    }

    #[test]
    fn test_add_same_item_increments_quantity() {
        let (id, price) = item(700);
        let mut cart = Cart::default();
        cart.add(id, "Капучино", price);
        cart.add(id, "Капучино", price);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entries()[0].quantity, 2);
    }

    #[test]
    fn test_decrement_below_one_removes_entry() {
        let (id, price) = item(700);
        let mut cart = Cart::default();
        cart.add(id, "Капучино", price);
        cart.add(id, "Капучино", price);

        assert!(cart.decrement(id));
        assert_eq!(cart.entries()[0].quantity, 1);
        assert!(cart.decrement(id));
        assert!(cart.is_empty());
        assert!(!cart.decrement(id));
    }

    #[test]
    fn test_increment_unknown_item_is_rejected() {
        let mut cart = Cart::default();
        assert!(!cart.increment(MenuItemId::generate()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_matches_surviving_entries() {
        let (a, price_a) = item(1500);
        let (b, price_b) = item(700);
        let mut cart = Cart::default();

        // Mixed sequence of mutations; the invariant must hold throughout.
        cart.add(a, "Манты", price_a);
        cart.add(b, "Чай", price_b);
        cart.increment(a);
        cart.increment(b);
        cart.decrement(b);
        cart.add(a, "Манты", price_a);

        for entry in cart.entries() {
            assert!(entry.quantity >= 1);
        }
        let expected: Tenge = cart.entries().iter().map(CartEntry::line_total).sum();
        assert_eq!(cart.totals().subtotal, expected);
        assert_eq!(cart.totals().subtotal, Tenge::new(1500 * 3 + 700));
    }

    #[test]
    fn test_delivery_fee_boundaries() {
        assert_eq!(delivery_fee(Tenge::ZERO), Tenge::ZERO);
        assert_eq!(delivery_fee(Tenge::new(1)), DELIVERY_FEE);
        assert_eq!(delivery_fee(Tenge::new(4999)), DELIVERY_FEE);
        assert_eq!(delivery_fee(Tenge::new(5000)), Tenge::ZERO);
        assert_eq!(delivery_fee(Tenge::new(5001)), Tenge::ZERO);
    }

    #[test]
    fn test_totals_above_threshold_skip_delivery() {
        let (a, price_a) = item(1500);
        let (b, price_b) = item(4000);
        let mut cart = Cart::default();
        cart.add(a, "Манты", price_a);
        cart.add(b, "Сырне", price_b);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Tenge::new(5500));
        assert_eq!(totals.delivery, Tenge::ZERO);
        assert_eq!(totals.total, Tenge::new(5500));
    }

    #[test]
    fn test_totals_below_threshold_add_delivery() {
        let (a, price_a) = item(1500);
        let mut cart = Cart::default();
        cart.add(a, "Манты", price_a);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Tenge::new(1500));
        assert_eq!(totals.delivery, Tenge::new(500));
        assert_eq!(totals.total, Tenge::new(2000));
    }

    #[test]
    fn test_labels_show_quantity() {
        let (a, price_a) = item(1500);
        let (b, price_b) = item(900);
        let mut cart = Cart::default();
        cart.add(a, "Манты", price_a);
        cart.add(a, "Манты", price_a);
        cart.add(b, "Лимонад", price_b);

        assert_eq!(cart.labels(), vec!["Манты ×2", "Лимонад"]);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let (a, price) = item(1500);
        let mut cart = Cart::default();
        cart.add(a, "Манты", price);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().total, Tenge::ZERO);
    }

    #[test]
    fn test_serde_roundtrip() {
        let (a, price) = item(1500);
        let mut cart = Cart::default();
        cart.add(a, "Манты", price);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
