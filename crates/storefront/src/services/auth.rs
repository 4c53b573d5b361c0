//! Placeholder authentication.
//!
//! Signing in or up records an identifier string in the session under
//! [`session_keys::USER`] and nothing more: there is no password check, no
//! account store and no token. Nothing in the storefront reads the value
//! back to authorize anything.

use shopfront_core::Email;
use tower_sessions::Session;
use tower_sessions::session::Error;

use crate::models::session_keys;

/// Record `email` as the signed-in identifier.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn sign_in(session: &Session, email: &Email) -> Result<(), Error> {
    session.insert(session_keys::USER, email.as_str()).await?;
    tracing::info!("visitor signed in");
    Ok(())
}

/// Sign-up is the same placeholder as sign-in: the identifier is stored and
/// the name and password are dropped.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn sign_up(session: &Session, email: &Email) -> Result<(), Error> {
    session.insert(session_keys::USER, email.as_str()).await?;
    tracing::info!("visitor signed up");
    Ok(())
}

/// Forget the stored identifier.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn sign_out(session: &Session) -> Result<(), Error> {
    session.remove::<String>(session_keys::USER).await?;
    Ok(())
}

/// The identifier recorded by the last sign-in or sign-up, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_user(session: &Session) -> Result<Option<String>, Error> {
    session.get::<String>(session_keys::USER).await
}
