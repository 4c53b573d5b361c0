//! Integration tests for Shopfront.
//!
//! Each test starts two servers on ephemeral localhost ports: a stub catalog
//! backend that serves `/api/getproduct` and `/api/postProduct` from memory,
//! and the real storefront router pointed at it. Requests go through a
//! `reqwest` client with a cookie store, so the session cookie carries the
//! cart between requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No external services are needed.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::header::LOCATION;
use serde_json::{Value, json};
use shopfront_storefront::config::{CatalogConfig, StorefrontConfig};
use shopfront_storefront::state::AppState;
use url::Url;

// =============================================================================
// Stub catalog backend
// =============================================================================

#[derive(Default)]
struct StubState {
    products: Mutex<Vec<Value>>,
    created: Mutex<Vec<Value>>,
    list_status: Mutex<Option<StatusCode>>,
    list_body: Mutex<Option<String>>,
    create_status: Mutex<Option<StatusCode>>,
}

/// In-memory stand-in for the catalog backend.
#[derive(Clone)]
pub struct StubCatalog {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubCatalog {
    /// Serve `products` from a fresh stub on an ephemeral port.
    pub async fn start(products: Vec<Value>) -> Self {
        let state = Arc::new(StubState {
            products: Mutex::new(products),
            ..StubState::default()
        });

        let app = Router::new()
            .route("/api/getproduct", get(list_products))
            .route("/api/postProduct", post(create_product))
            .with_state(Arc::clone(&state));

        let addr = serve(app).await;
        Self { addr, state }
    }

    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("stub url")
    }

    /// Make the list endpoint answer with `status` and no products.
    pub fn fail_listing(&self, status: StatusCode) {
        *self.state.list_status.lock().expect("lock") = Some(status);
    }

    /// Make the list endpoint answer 200 with `body` verbatim.
    pub fn serve_raw_listing(&self, body: &str) {
        *self.state.list_body.lock().expect("lock") = Some(body.to_string());
    }

    /// Make the create endpoint answer with `status`.
    pub fn fail_creates(&self, status: StatusCode) {
        *self.state.create_status.lock().expect("lock") = Some(status);
    }

    /// Bodies received by the create endpoint, in order.
    #[must_use]
    pub fn created(&self) -> Vec<Value> {
        self.state.created.lock().expect("lock").clone()
    }
}

async fn list_products(State(state): State<Arc<StubState>>) -> Response {
    if let Some(status) = *state.list_status.lock().expect("lock") {
        return (status, "catalog unavailable").into_response();
    }
    if let Some(body) = state.list_body.lock().expect("lock").clone() {
        return ([(CONTENT_TYPE, "application/json")], body).into_response();
    }
    let products = state.products.lock().expect("lock").clone();
    Json(products).into_response()
}

async fn create_product(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.created.lock().expect("lock").push(body.clone());
    if let Some(status) = *state.create_status.lock().expect("lock") {
        return (status, "rejected").into_response();
    }
    state.products.lock().expect("lock").push(body);
    (StatusCode::CREATED, Json(json!({ "message": "created" }))).into_response()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// An address nothing is listening on.
async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    listener.local_addr().expect("local addr")
}

// =============================================================================
// Fixtures
// =============================================================================

/// Catalog entry as the backend serializes it.
#[must_use]
pub fn product_json(id: &str, name: &str, price: u32, category: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "image": format!("https://img.example.com/{id}.jpg"),
        "category": category,
        "stock": 10,
        "__v": 0
    })
}

/// A small catalog used by most tests.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        product_json("lamp-1", "Desk Lamp", 100, "home"),
        product_json("book-1", "Rust in Action", 450, "books"),
        product_json("ball-1", "Football", 799, "sports"),
    ]
}

// =============================================================================
// Storefront under test
// =============================================================================

/// A running storefront, its stub catalog and a browser-like client.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub catalog: StubCatalog,
}

impl TestContext {
    /// Storefront backed by [`sample_catalog`].
    pub async fn new() -> Self {
        Self::with_products(sample_catalog()).await
    }

    /// Storefront backed by a stub serving `products`.
    pub async fn with_products(products: Vec<Value>) -> Self {
        let catalog = StubCatalog::start(products).await;
        let api_url = catalog.url();
        Self::start(catalog, api_url).await
    }

    /// Storefront whose catalog URL points at a closed port.
    pub async fn with_unreachable_catalog() -> Self {
        let catalog = StubCatalog::start(Vec::new()).await;
        let api_url = Url::parse(&format!("http://{}", closed_port().await)).expect("url");
        Self::start(catalog, api_url).await
    }

    async fn start(catalog: StubCatalog, api_url: Url) -> Self {
        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://localhost".to_string(),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
            catalog: CatalogConfig {
                api_url,
                // Every request sees the stub's current state.
                cache_ttl: Duration::ZERO,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = serve(shopfront_storefront::app(AppState::new(config))).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            catalog,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// GET `path` and return the status and body.
    pub async fn page(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self.get(path).await;
        let status = response.status();
        (status, response.text().await.expect("response body"))
    }

    /// Add `product_id` to the cart, asserting the redirect back to its page.
    pub async fn add_to_cart(&self, product_id: &str) {
        let response = self
            .post_form("/cart/add", &[("product_id", product_id)])
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            format!("/products/{product_id}?added=true")
        );
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
