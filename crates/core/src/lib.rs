//! Shopfront Core - Storefront domain library.
//!
//! This crate holds everything the storefront knows about products, carts
//! and money that does not require I/O:
//! - [`types`] - Newtype wrappers for ids, prices, emails and categories
//! - [`product`] - Catalog products and the product creation payload
//! - [`cart`] - The cart store and its mutation operations
//! - [`promo`] - Promotional code state
//! - [`pricing`] - Subtotal, discount, tax and total derivation
//! - [`validation`] - Submit-time validation for the storefront's forms
//!
//! # Architecture
//!
//! No I/O, no HTTP clients, no sessions. The storefront binary owns those
//! and funnels every cart mutation through the operations defined here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod pricing;
pub mod product;
pub mod promo;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use pricing::{PricingResult, price_cart};
pub use product::{NewProduct, Product};
pub use promo::PromoState;
pub use types::*;
pub use validation::FieldErrors;
