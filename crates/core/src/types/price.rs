//! Type-safe price representation using decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits shown for any displayed amount.
const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
///
/// Arithmetic is done on the raw [`Decimal`]; rounding only happens when the
/// price is formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store's default currency.
    #[must_use]
    pub fn store(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }

    /// Format for display (e.g., "₹212.40").
    ///
    /// Midpoints round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.2}", self.currency_code.symbol())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Currency the store trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Symbol printed in front of an amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::store(Decimal::new(2124, 1)).display(), "₹212.40");
        assert_eq!(Price::store(Decimal::ZERO).display(), "₹0.00");
    }

    #[test]
    fn test_display_rounds_midpoint_away_from_zero() {
        assert_eq!(Price::store(Decimal::new(10_005, 3)).display(), "₹10.01");
        assert_eq!(Price::store(Decimal::new(12_344, 3)).display(), "₹12.34");
        assert_eq!(Price::store(Decimal::new(-10_005, 3)).display(), "₹-10.01");
    }

    #[test]
    fn test_store_price_uses_rupees() {
        let price = Price::store(Decimal::new(5, 0));
        assert_eq!(price.currency_code, CurrencyCode::INR);
        assert_eq!(price.to_string(), "₹5.00");
    }
}
