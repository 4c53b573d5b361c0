//! Cart route handlers.
//!
//! Every mutation is a form POST that applies one cart operation to the
//! session-held cart and redirects back to `/cart` (post/redirect/get).
//! Clearing takes two requests: `/cart/clear` marks the clear as pending and
//! the cart page asks for confirmation, then `/cart/clear/confirm` or
//! `/cart/clear/cancel` settles it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::pricing::PricingError;
use shopfront_core::{Cart, CartLine, Price, PricingResult, ProductId, PromoState, price_cart};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::services::cart::{apply_promo, load_cart, load_promo, update_cart};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub decrement_to: u32,
    pub increment_to: u32,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let quantity = line.quantity();
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            category: line.product.category.label().to_string(),
            unit_price: line.product.unit_price().display(),
            quantity,
            line_total: line
                .total()
                .map(|total| Price::store(total).display())
                .unwrap_or_default(),
            decrement_to: quantity.saturating_sub(1),
            increment_to: quantity.saturating_add(1),
        }
    }
}

/// Order summary display data for templates.
#[derive(Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub has_discount: bool,
}

impl From<&PricingResult> for SummaryView {
    fn from(pricing: &PricingResult) -> Self {
        let [subtotal, discount, tax, total] = pricing.prices();
        Self {
            subtotal: subtotal.display(),
            discount: discount.display(),
            tax: tax.display(),
            total: total.display(),
            has_discount: !pricing.discount.is_zero(),
        }
    }
}

/// Cart and summary together, as both the cart and checkout pages show them.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub summary: SummaryView,
    pub item_count: u32,
}

impl CartView {
    /// # Errors
    ///
    /// Returns `PricingError` if the cart's totals overflow.
    pub fn new(cart: &Cart, promo: &PromoState) -> std::result::Result<Self, PricingError> {
        let pricing = price_cart(cart, promo)?;
        Ok(Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            summary: SummaryView::from(&pricing),
            item_count: cart.item_count(),
        })
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Form naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductIdForm {
    pub product_id: String,
}

/// Quantity form. The quantity arrives as typed; anything that is not a
/// whole number is ignored like any other out-of-range value.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub product_id: String,
    pub quantity: String,
}

/// Promo code form.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    #[serde(default)]
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub promo_code: String,
    pub promo_applied: bool,
    pub clear_pending: bool,
}

/// Empty cart template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/empty.html")]
pub struct CartEmptyTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page, or the empty state when there is nothing in it.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(CartEmptyTemplate.into_response());
    }
    let promo = load_promo(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::new(&cart, &promo)?,
        promo_code: promo.code.clone(),
        promo_applied: promo.applied,
        clear_pending: cart.clear_pending(),
    }
    .into_response())
}

/// Add a product to the cart and return to its detail page.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductIdForm>,
) -> Result<Redirect> {
    let id = form.product_id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("missing product_id".to_string()));
    }

    let product = state
        .catalog()
        .find_by_id(&ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if !update_cart(&session, |cart| cart.add(product)).await? {
        tracing::warn!(product_id = %id, "cart total too large, product not added");
        return Ok(Redirect::to("/cart"));
    }
    add_breadcrumb("cart", "Added product", Some(&[("product_id", id)]));

    Ok(Redirect::to(&format!(
        "/products/{}?added=true",
        urlencoding::encode(id)
    )))
}

/// Set a line's quantity. Values below 1 change nothing.
#[instrument(skip(session))]
pub async fn set_quantity(session: Session, Form(form): Form<QuantityForm>) -> Result<Redirect> {
    if let Ok(quantity) = form.quantity.trim().parse::<i64>() {
        let id = ProductId::new(form.product_id);
        let changed = update_cart(&session, |cart| cart.set_quantity(&id, quantity)).await?;
        if !changed {
            tracing::debug!(%id, quantity, "quantity unchanged");
        }
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a product from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<ProductIdForm>) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    update_cart(&session, |cart| cart.remove(&id)).await?;
    Ok(Redirect::to("/cart"))
}

/// Apply a promo code. Unrecognised codes are ignored without a message.
#[instrument(skip(session, form))]
pub async fn promo(session: Session, Form(form): Form<PromoForm>) -> Result<Redirect> {
    let applied = apply_promo(&session, &form.code).await?;
    tracing::debug!(applied, "promo code submitted");
    Ok(Redirect::to("/cart"))
}

/// First step of clearing the cart: ask for confirmation.
#[instrument(skip(session))]
pub async fn request_clear(session: Session) -> Result<Redirect> {
    update_cart(&session, Cart::request_clear).await?;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart, if a clear was requested.
#[instrument(skip(session))]
pub async fn confirm_clear(session: Session) -> Result<Redirect> {
    if update_cart(&session, Cart::confirm_clear).await? {
        add_breadcrumb("cart", "Cleared cart", None);
    }
    Ok(Redirect::to("/cart"))
}

/// Keep the cart as it is.
#[instrument(skip(session))]
pub async fn cancel_clear(session: Session) -> Result<Redirect> {
    update_cart(&session, Cart::cancel_clear).await?;
    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::{Category, Product};

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(Product {
            id: ProductId::new("a"),
            name: "Lamp".to_string(),
            description: String::new(),
            price: Decimal::from(100),
            image: String::new(),
            category: Category::Home,
            stock: 5,
            brand: None,
        });
        cart.set_quantity(&ProductId::new("a"), 2);
        cart
    }

    #[test]
    fn test_cart_view_without_promo() {
        let view = CartView::new(&cart(), &PromoState::default()).unwrap();

        assert_eq!(view.item_count, 2);
        assert_eq!(view.lines[0].line_total, "₹200.00");
        assert_eq!(view.lines[0].decrement_to, 1);
        assert_eq!(view.lines[0].increment_to, 3);
        assert_eq!(view.summary.tax, "₹36.00");
        assert_eq!(view.summary.total, "₹236.00");
        assert!(!view.summary.has_discount);
    }

    #[test]
    fn test_cart_view_with_promo() {
        let mut promo = PromoState::default();
        promo.apply("SAVE10");
        let view = CartView::new(&cart(), &promo).unwrap();

        assert!(view.summary.has_discount);
        assert_eq!(view.summary.discount, "₹20.00");
        assert_eq!(view.summary.tax, "₹32.40");
        assert_eq!(view.summary.total, "₹212.40");
    }
}
