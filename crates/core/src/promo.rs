//! Promotional code state.

use serde::{Deserialize, Serialize};

/// The only code the store honours, compared case-insensitively.
pub const PROMO_CODE: &str = "SAVE10";

/// The promo code a visitor entered and whether it took effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoState {
    pub code: String,
    pub applied: bool,
}

impl PromoState {
    /// Try a code.
    ///
    /// Leading and trailing whitespace is ignored before the case-insensitive
    /// comparison, so `" save10 "` matches. A matching code marks the promo
    /// applied and remembers it, trimmed. Anything else leaves the state
    /// exactly as it was; the return value is the only signal of failure.
    pub fn apply(&mut self, code: &str) -> bool {
        let code = code.trim();
        if !code.eq_ignore_ascii_case(PROMO_CODE) {
            return false;
        }
        self.code = code.to_string();
        self.applied = true;
        true
    }
}
