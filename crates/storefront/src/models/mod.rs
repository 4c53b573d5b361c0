//! Storefront models.
//!
//! Domain types (products, carts, prices) live in `shopfront_core`; this
//! module only holds what is specific to the web layer.

pub mod session;

pub use session::keys as session_keys;
