//! Checkout summary page.
//!
//! There is no payment step: the page shows the same lines and totals as the
//! cart so the visitor can review the order.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::cart::CartView;
use crate::services::cart::{load_cart, load_promo};

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub promo_applied: bool,
}

/// Show the order summary. An empty cart sends the visitor back to `/cart`.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    let promo = load_promo(&session).await?;

    Ok(CheckoutTemplate {
        cart: CartView::new(&cart, &promo)?,
        promo_applied: promo.applied,
    }
    .into_response())
}
