//! Add-product form.
//!
//! The form is validated locally first; only a clean form is sent to the
//! catalog backend. Whatever the outcome, a failed submission re-renders the
//! form with the visitor's values still in it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::validation::ProductForm;
use shopfront_core::{Category, FieldErrors};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

const BACKEND_REJECTED: &str = "Failed to add product. Please try again.";
const BACKEND_UNREACHABLE: &str = "Server error. Please try again later.";

/// Category select option.
#[derive(Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn category_options(selected: &str) -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            label: c.label(),
            selected: c.as_str().eq_ignore_ascii_case(selected.trim()),
        })
        .collect()
}

/// Query parameters for the form page.
#[derive(Debug, Default, Deserialize)]
pub struct NewProductQuery {
    /// Set after a successful submission.
    #[serde(default)]
    pub created: bool,
}

/// Add-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/new_product.html")]
pub struct NewProductTemplate {
    pub form: ProductForm,
    pub categories: Vec<CategoryOption>,
    pub errors: FieldErrors,
    pub alert: Option<&'static str>,
    pub created: bool,
}

impl NewProductTemplate {
    fn new(form: ProductForm) -> Self {
        let categories = category_options(&form.category);
        Self {
            form,
            categories,
            errors: FieldErrors::new(),
            alert: None,
            created: false,
        }
    }
}

/// Display an empty add-product form.
pub async fn new_product_page(Query(query): Query<NewProductQuery>) -> impl IntoResponse {
    NewProductTemplate {
        created: query.created,
        ..NewProductTemplate::new(ProductForm::default())
    }
}

/// Validate and submit the add-product form.
#[instrument(skip(state, form))]
pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let product = match form.validate() {
        Ok(product) => product,
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "product form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                NewProductTemplate {
                    errors,
                    ..NewProductTemplate::new(form)
                },
            )
                .into_response();
        }
    };

    match state.catalog().create_product(&product).await {
        Ok(()) => {
            add_breadcrumb(
                "admin",
                "Created product",
                Some(&[("name", product.name.as_str())]),
            );
            Redirect::to("/admin/products/new?created=true").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            let alert = if e.is_transport() {
                BACKEND_UNREACHABLE
            } else {
                BACKEND_REJECTED
            };
            (
                StatusCode::BAD_GATEWAY,
                NewProductTemplate {
                    alert: Some(alert),
                    ..NewProductTemplate::new(form)
                },
            )
                .into_response()
        }
    }
}
