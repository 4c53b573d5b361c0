//! The cart store.
//!
//! A [`Cart`] is the single source of truth for what a visitor intends to
//! buy. Views never touch its fields; every change goes through one of the
//! operations below, which keep two invariants:
//!
//! - there is at most one line per product id, and
//! - every line's quantity is at least 1.
//!
//! Clearing is a two-phase action ([`Cart::request_clear`] then
//! [`Cart::confirm_clear`]) so the confirmation step is part of the contract
//! instead of a blocking prompt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// Quantity a product has when it first enters the cart.
pub const DEFAULT_QUANTITY: u32 = 1;

/// A product in the cart together with how many of it are wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: DEFAULT_QUANTITY,
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price × quantity` for this line, or `None` if it does not fit in a
    /// [`Decimal`].
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    clear_pending: bool,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    ///
    /// Adding a product already in the cart bumps that line's quantity by one
    /// rather than appending a second line. Stock is not checked.
    ///
    /// Returns `false`, leaving the cart unchanged, when the result could no
    /// longer be priced.
    pub fn add(&mut self, product: Product) -> bool {
        match self.find_line(&product.id) {
            Some((index, quantity)) => {
                if !self.try_set(index, quantity.saturating_add(1)) {
                    return false;
                }
            }
            None => {
                self.lines.push(CartLine::new(product));
                if !self.is_priceable() {
                    self.lines.pop();
                    return false;
                }
            }
        }
        self.clear_pending = false;
        true
    }

    /// Remove every line for `id`. Returns `false` when nothing matched.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        let removed = self.lines.len() != before;
        if self.lines.is_empty() {
            self.clear_pending = false;
        }
        removed
    }

    /// Set the quantity for `id`.
    ///
    /// Quantities below 1, unknown ids and quantities that would make the
    /// cart too large to price are ignored without error; the return value
    /// says whether anything changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };
        if quantity < 1 {
            return false;
        }
        match self.find_line(id) {
            Some((index, current)) if current != quantity => self.try_set(index, quantity),
            _ => false,
        }
    }

    fn find_line(&self, id: &ProductId) -> Option<(usize, u32)> {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.id() == id)
            .map(|(index, line)| (index, line.quantity))
    }

    /// Set a line's quantity, rolling back if the cart stops being priceable.
    fn try_set(&mut self, index: usize, quantity: u32) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        let previous = std::mem::replace(&mut line.quantity, quantity);
        if self.is_priceable() {
            return true;
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = previous;
        }
        false
    }

    /// Whether [`price_cart`](crate::pricing::price_cart) succeeds for this
    /// cart. The undiscounted total bounds every promo state.
    fn is_priceable(&self) -> bool {
        crate::pricing::price_cart(self, &crate::promo::PromoState::default()).is_ok()
    }

    /// Quantity for `id`, or `None` if it is not in the cart.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.id() == id)
            .map(CartLine::quantity)
    }

    /// First phase of clearing. An empty cart has nothing to confirm, so the
    /// request is dropped and `false` returned.
    pub fn request_clear(&mut self) -> bool {
        self.clear_pending = !self.lines.is_empty();
        self.clear_pending
    }

    /// Second phase of clearing. Empties the cart only when a clear was
    /// requested; returns whether the cart was emptied.
    pub fn confirm_clear(&mut self) -> bool {
        if !self.clear_pending {
            return false;
        }
        self.lines.clear();
        self.clear_pending = false;
        true
    }

    /// Abandon a pending clear, leaving the lines as they were.
    pub fn cancel_clear(&mut self) {
        self.clear_pending = false;
    }

    #[must_use]
    pub const fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }
}
