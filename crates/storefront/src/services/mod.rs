//! Session-backed services.
//!
//! - [`cart`] - Load and persist the visitor's cart and promo state
//! - [`auth`] - Placeholder sign-in/sign-up that records an identifier

pub mod auth;
pub mod cart;
