//! Session keys.
//!
//! Everything a visitor accumulates while browsing is kept in their session:
//! it lives as long as the session does and is never shared between visitors.

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for the visitor's [`shopfront_core::Cart`].
    pub const CART: &str = "cart";

    /// Key for the visitor's [`shopfront_core::PromoState`].
    pub const PROMO: &str = "promo";

    /// Key for the identifier written by sign-in and sign-up.
    pub const USER: &str = "user";
}
