//! Listing, product detail and static pages.

use std::time::Duration;

use reqwest::StatusCode;
use shopfront_integration_tests::{StubCatalog, TestContext, product_json};
use shopfront_storefront::catalog::{CatalogClient, CatalogError};
use shopfront_storefront::config::CatalogConfig;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.page("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_listing_shows_every_product() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.page("/").await;
    assert_eq!(status, StatusCode::OK);
    for name in ["Desk Lamp", "Rust in Action", "Football"] {
        assert!(body.contains(name), "{name}");
    }
    assert!(body.contains("₹799.00"));
}

#[tokio::test]
async fn test_listing_filters_by_category() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.page("/?category=books").await;
    assert!(body.contains("Rust in Action"));
    assert!(!body.contains("Desk Lamp"));
    assert!(!body.contains("Football"));
}

#[tokio::test]
async fn test_unknown_category_from_backend_still_lists() {
    let ctx = TestContext::with_products(vec![
        product_json("g-1", "Garden Hose", 300, "garden"),
        product_json("lamp-1", "Desk Lamp", 100, "home"),
    ])
    .await;

    let (status, body) = ctx.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Garden Hose"));
    assert!(body.contains("Desk Lamp"));
}

#[tokio::test]
async fn test_listing_survives_catalog_outage() {
    let ctx = TestContext::new().await;
    ctx.catalog.fail_listing(StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = ctx.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The catalog could not be loaded"));
}

#[tokio::test]
async fn test_listing_with_unreachable_catalog() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let (status, body) = ctx.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The catalog could not be loaded"));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.page("/products/book-1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rust in Action"));
    assert!(body.contains("₹450.00"));
    assert!(body.contains("10 in stock"));
    assert!(!body.contains("Added to cart"));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.page("/products/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));
}

#[tokio::test]
async fn test_about_page() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.page("/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("About Shopfront"));
    assert!(body.contains("30-day"));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/").await;
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.page("/static/css/main.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".cart-line"));
}

#[tokio::test]
async fn test_product_detail_during_catalog_outage_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.catalog.fail_listing(StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = ctx.page("/products/book-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));
}

#[tokio::test]
async fn test_product_detail_with_unreachable_catalog_is_not_found() {
    let ctx = TestContext::with_unreachable_catalog().await;

    let (status, body) = ctx.page("/products/book-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));
}

#[tokio::test]
async fn test_product_detail_with_malformed_catalog_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.catalog.serve_raw_listing(r#"{"products": "not an array"}"#);

    let (status, body) = ctx.page("/products/book-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));

    let (status, body) = ctx.page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The catalog could not be loaded"));
}

#[tokio::test]
async fn test_malformed_listing_is_a_parse_error() {
    let stub = StubCatalog::start(Vec::new()).await;
    stub.serve_raw_listing("[{\"_id\": \"x\"");
    let client = CatalogClient::new(&CatalogConfig {
        api_url: stub.url(),
        cache_ttl: Duration::ZERO,
    });

    let err = client.load_all().await.expect_err("truncated JSON");
    assert!(matches!(err, CatalogError::Parse(_)), "{err:?}");
    assert!(!err.is_transport());

    stub.fail_listing(StatusCode::SERVICE_UNAVAILABLE);
    let err = client.load_all().await.expect_err("503");
    assert!(matches!(err, CatalogError::Status(503)), "{err:?}");
}

#[tokio::test]
async fn test_cart_refuses_quantity_that_cannot_be_priced() {
    let ctx = TestContext::with_products(vec![serde_json::json!({
        "_id": "yacht-1",
        "name": "Superyacht",
        "price": 1e20,
        "category": "sports"
    })])
    .await;

    ctx.add_to_cart("yacht-1").await;
    let response = ctx
        .post_form(
            "/cart/quantity",
            &[("product_id", "yacht-1"), ("quantity", "4294967295")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    for path in ["/cart", "/checkout"] {
        let (status, body) = ctx.page(path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(body.contains("Superyacht"), "{path}");
    }
    let (_, body) = ctx.page("/cart").await;
    assert!(body.contains("Cart (1 items)"));
}
