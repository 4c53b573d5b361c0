//! Home page route handler: the product listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shopfront_core::Category;
use tracing::instrument;

use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
}

/// Category filter link.
#[derive(Clone)]
pub struct CategoryLink {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryLink>,
    pub filtered: bool,
    pub catalog_unavailable: bool,
}

/// Display the product listing, optionally narrowed to one category.
///
/// If the catalog cannot be loaded the page still renders, with a notice in
/// place of the grid.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let selected = query
        .category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok());

    let (products, catalog_unavailable) = match state.catalog().load_all().await {
        Ok(products) => (
            products
                .iter()
                .filter(|p| selected.is_none_or(|c| p.category == c))
                .map(ProductView::from)
                .collect(),
            false,
        ),
        Err(e) => {
            tracing::warn!("Failed to load catalog for listing: {e}");
            (Vec::new(), true)
        }
    };

    HomeTemplate {
        products,
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryLink {
                value: c.as_str(),
                label: c.label(),
                active: selected == Some(c),
            })
            .collect(),
        filtered: selected.is_some(),
        catalog_unavailable,
    }
}
