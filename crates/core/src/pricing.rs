//! Pricing engine.
//!
//! Pure functions from a [`Cart`] and [`PromoState`] to a [`PricingResult`].
//! All arithmetic is exact decimal; nothing is rounded until display.
//!
//! ```text
//! subtotal = Σ price × quantity
//! discount = subtotal × 10%          (only when the promo is applied)
//! tax      = (subtotal − discount) × 18%
//! total    = subtotal − discount + tax
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cart::Cart;
use crate::promo::PromoState;
use crate::types::Price;

/// Flat promotional discount, 10%.
pub const PROMO_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Sales tax applied after discount, 18%.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Derived cart totals. Never stored; recompute after every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PricingResult {
    /// The four amounts as store-currency prices, for display.
    #[must_use]
    pub fn prices(&self) -> [Price; 4] {
        [
            Price::store(self.subtotal),
            Price::store(self.discount),
            Price::store(self.tax),
            Price::store(self.total),
        ]
    }
}

/// Error returned when a cart's totals do not fit in a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart total is too large to price")]
pub struct PricingError;

/// Sum of `price × quantity` over every line.
///
/// # Errors
///
/// Returns [`PricingError`] if a line total or the sum overflows.
pub fn subtotal(cart: &Cart) -> Result<Decimal, PricingError> {
    cart.lines().iter().try_fold(Decimal::ZERO, |acc, line| {
        line.total()
            .and_then(|total| acc.checked_add(total))
            .ok_or(PricingError)
    })
}

/// Price a cart. An empty cart prices to all zeros.
///
/// # Errors
///
/// Returns [`PricingError`] if any intermediate amount overflows.
pub fn price_cart(cart: &Cart, promo: &PromoState) -> Result<PricingResult, PricingError> {
    let subtotal = subtotal(cart)?;
    let discount = if promo.applied {
        subtotal.checked_mul(PROMO_DISCOUNT_RATE).ok_or(PricingError)?
    } else {
        Decimal::ZERO
    };
    let taxable = subtotal.checked_sub(discount).ok_or(PricingError)?;
    let tax = taxable.checked_mul(TAX_RATE).ok_or(PricingError)?;
    let total = taxable.checked_add(tax).ok_or(PricingError)?;

    Ok(PricingResult {
        subtotal,
        discount,
        tax,
        total,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::tests::product;
    use crate::types::ProductId;

    fn cart_with_a_twice() -> Cart {
        let mut cart = Cart::new();
        cart.add(product("a", 100));
        cart.set_quantity(&ProductId::new("a"), 2);
        cart
    }

    fn applied() -> PromoState {
        let mut promo = PromoState::default();
        promo.apply("SAVE10");
        promo
    }

    #[test]
    fn test_without_promo() {
        let result = price_cart(&cart_with_a_twice(), &PromoState::default()).unwrap();

        assert_eq!(result.subtotal, Decimal::from(200));
        assert_eq!(result.discount, Decimal::ZERO);
        assert_eq!(result.tax, Decimal::from(36));
        assert_eq!(result.total, Decimal::from(236));
    }

    #[test]
    fn test_with_promo() {
        let result = price_cart(&cart_with_a_twice(), &applied()).unwrap();

        assert_eq!(result.subtotal, Decimal::from(200));
        assert_eq!(result.discount, Decimal::from(20));
        assert_eq!(result.tax, Decimal::new(324, 1));
        assert_eq!(result.total, Decimal::new(2124, 1));
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        assert_eq!(
            price_cart(&Cart::new(), &applied()),
            Ok(PricingResult::default())
        );
    }

    #[test]
    fn test_total_identity_holds_for_mixed_carts() {
        let mut cart = Cart::new();
        cart.add(product("a", 999));
        cart.add(product("b", 1));
        cart.add(product("c", 45));
        cart.set_quantity(&ProductId::new("c"), 7);

        for promo in [PromoState::default(), applied()] {
            let r = price_cart(&cart, &promo).unwrap();
            assert_eq!(r.total, r.subtotal - r.discount + r.tax);
            assert_eq!(r.tax, (r.subtotal - r.discount) * TAX_RATE);
            if promo.applied {
                assert_eq!(r.discount, r.subtotal * PROMO_DISCOUNT_RATE);
            }
        }
    }

    #[test]
    fn test_display_prices() {
        let pricing = price_cart(&cart_with_a_twice(), &applied()).unwrap();
        let [subtotal, discount, tax, total] = pricing.prices();
        assert_eq!(subtotal.display(), "₹200.00");
        assert_eq!(discount.display(), "₹20.00");
        assert_eq!(tax.display(), "₹32.40");
        assert_eq!(total.display(), "₹212.40");
    }

    fn huge() -> Decimal {
        Decimal::from_str_exact("100000000000000000000").unwrap()
    }

    #[test]
    fn test_quantity_that_would_overflow_is_refused() {
        let mut cart = Cart::new();
        let mut lamp = product("a", 0);
        lamp.price = huge();
        assert!(cart.add(lamp));

        assert!(!cart.set_quantity(&ProductId::new("a"), i64::from(u32::MAX)));
        assert_eq!(cart.quantity(&ProductId::new("a")), Some(1));

        let result = price_cart(&cart, &applied()).unwrap();
        assert_eq!(result.subtotal, huge());
    }

    #[test]
    fn test_line_that_would_overflow_is_refused() {
        let near_max = Decimal::from_str_exact("60000000000000000000000000000").unwrap();
        let mut cart = Cart::new();
        let mut first = product("a", 0);
        first.price = near_max;
        assert!(cart.add(first));

        let mut second = product("b", 0);
        second.price = near_max;
        assert!(!cart.add(second));
        assert_eq!(cart.lines().len(), 1);
        assert!(price_cart(&cart, &PromoState::default()).is_ok());
    }

    #[test]
    fn test_overflowing_cart_is_an_error_not_a_panic() {
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "lines": [{
                "product": { "_id": "a", "name": "Lamp", "price": 1e20 },
                "quantity": u32::MAX
            }]
        }))
        .unwrap();

        assert_eq!(cart.lines()[0].total(), None);
        assert_eq!(subtotal(&cart), Err(PricingError));
        assert_eq!(price_cart(&cart, &PromoState::default()), Err(PricingError));
    }
}
