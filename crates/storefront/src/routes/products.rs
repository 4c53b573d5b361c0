//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shopfront_core::{Product, ProductId};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub brand: Option<String>,
    pub stock: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.unit_price().display(),
            image: product.image.clone(),
            category: product.category.label().to_string(),
            brand: product.brand.clone(),
            stock: product.stock,
            in_stock: product.in_stock(),
        }
    }
}

/// Query parameters for the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct ShowQuery {
    /// Set after a successful add-to-cart redirect.
    #[serde(default)]
    pub added: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub added: bool,
}

/// Product not found template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub message: &'static str,
}

/// Display product detail page.
///
/// A product that is missing from the catalog and a catalog that could not be
/// loaded both render the "not found" page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Response {
    match state.catalog().find_by_id(&ProductId::new(id)).await {
        Ok(Some(product)) => ProductShowTemplate {
            product: ProductView::from(&product),
            added: query.added,
        }
        .into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::warn!("Failed to load catalog for product page: {e}");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        ProductNotFoundTemplate {
            message: "The product you're looking for doesn't exist or has been removed.",
        },
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::Category;

    use super::*;

    #[test]
    fn test_product_view_formats_price() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Backpack".to_string(),
            description: "30L".to_string(),
            price: Decimal::new(249_900, 2),
            image: "https://img.example.com/bag.jpg".to_string(),
            category: Category::Sports,
            stock: 0,
            brand: Some("Trailhead".to_string()),
        };

        let view = ProductView::from(&product);
        assert_eq!(view.price, "₹2499.00");
        assert_eq!(view.category, "Sports");
        assert!(!view.in_stock);
    }
}
