//! Cart persistence in the visitor session.
//!
//! Handlers never edit a stored cart directly: they go through
//! [`update_cart`], which loads the cart, applies one of the
//! [`shopfront_core::Cart`] operations and writes the result back.
//!
//! The load and the save are not guarded against each other. Two requests
//! from the same visitor that overlap (a double-clicked "+") both start from
//! the same stored cart and the later save wins, so one of the changes is
//! lost. Each visitor is treated as a single actor; nothing else writes to
//! their cart.

use shopfront_core::{Cart, PromoState};
use tower_sessions::Session;
use tower_sessions::session::Error;

use crate::models::session_keys;

/// The visitor's cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails or holds an unreadable cart.
pub async fn load_cart(session: &Session) -> Result<Cart, Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), Error> {
    session.insert(session_keys::CART, cart).await
}

/// Apply `f` to the stored cart and persist the result.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn update_cart<T>(session: &Session, f: impl FnOnce(&mut Cart) -> T) -> Result<T, Error> {
    let mut cart = load_cart(session).await?;
    let outcome = f(&mut cart);
    save_cart(session, &cart).await?;
    Ok(outcome)
}

/// The visitor's promo state, or the default (nothing applied).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_promo(session: &Session) -> Result<PromoState, Error> {
    Ok(session
        .get::<PromoState>(session_keys::PROMO)
        .await?
        .unwrap_or_default())
}

/// Try a promo code. Unknown codes leave the stored state untouched.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn apply_promo(session: &Session, code: &str) -> Result<bool, Error> {
    let mut promo = load_promo(session).await?;
    if !promo.apply(code) {
        return Ok(false);
    }
    session.insert(session_keys::PROMO, &promo).await?;
    Ok(true)
}
