//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (?category= filter)
//! GET  /health                 - Health check
//! GET  /about                  - About page
//!
//! # Products
//! GET  /products/{id}          - Product detail (?added=true after add-to-cart)
//!
//! # Cart (form POST, then redirect)
//! GET  /cart                   - Cart page or empty state
//! POST /cart/add               - Add product, back to its detail page
//! POST /cart/quantity          - Set line quantity
//! POST /cart/remove            - Remove line
//! POST /cart/promo             - Apply promo code
//! POST /cart/clear             - Ask to clear the cart
//! POST /cart/clear/confirm     - Clear the cart
//! POST /cart/clear/cancel      - Keep the cart
//!
//! # Checkout
//! GET  /checkout               - Order summary
//!
//! # Auth (placeholder)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Sign-up page
//! POST /auth/signup            - Sign-up action
//! POST /auth/logout            - Logout action
//!
//! # Admin
//! GET  /admin/products/new     - Add-product form
//! POST /admin/products         - Create product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/quantity", post(cart::set_quantity))
        .route("/remove", post(cart::remove))
        .route("/promo", post(cart::promo))
        .route("/clear", post(cart::request_clear))
        .route("/clear/confirm", post(cart::confirm_clear))
        .route("/clear/cancel", post(cart::cancel_clear))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(admin::create_product))
        .route("/products/new", get(admin::new_product_page))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/about", get(pages::about))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
async fn health() -> &'static str {
    "ok"
}
