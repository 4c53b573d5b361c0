//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// A headline figure on the about page.
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub stats: Vec<Stat>,
}

/// Display the about page.
pub async fn about() -> impl IntoResponse {
    AboutTemplate {
        stats: vec![
            Stat {
                value: "9",
                label: "Curated categories",
            },
            Stat {
                value: "30-day",
                label: "Return policy",
            },
            Stat {
                value: "Free",
                label: "Shipping on every order",
            },
        ],
    }
}
