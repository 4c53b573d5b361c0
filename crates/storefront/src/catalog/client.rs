//! HTTP client for the catalog backend.
//!
//! Uses `reqwest` for HTTP and caches the product list with `moka`.

use std::sync::Arc;

use moka::future::Cache;
use shopfront_core::product::find_by_id;
use shopfront_core::{NewProduct, Product, ProductId};
use tracing::{debug, instrument};

use super::CatalogError;
use crate::config::CatalogConfig;

/// Longest response body excerpt written to the logs.
const LOG_BODY_LIMIT: usize = 500;

/// Cache key for catalog responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    AllProducts,
}

/// Client for the catalog backend.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    list_endpoint: String,
    create_endpoint: String,
    cache: Option<Cache<CacheKey, Arc<Vec<Product>>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.cache_ttl)
                .build()
        });

        let base = config.api_url.as_str().trim_end_matches('/');

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                list_endpoint: format!("{base}/api/getproduct"),
                create_endpoint: format!("{base}/api/postProduct"),
                cache,
            }),
        }
    }

    /// Load the full product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails, the backend answers with a
    /// non-success status, or the body is not a product array.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(cache) = &self.inner.cache
            && let Some(products) = cache.get(&CacheKey::AllProducts).await
        {
            debug!(count = products.len(), "catalog cache hit");
            return Ok(products);
        }

        let response = self
            .inner
            .client
            .get(&self.inner.list_endpoint)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog product list"
            );
            CatalogError::Parse(e)
        })?;

        debug!(count = products.len(), "loaded catalog");
        let products = Arc::new(products);

        if let Some(cache) = &self.inner.cache {
            cache
                .insert(CacheKey::AllProducts, Arc::clone(&products))
                .await;
        }

        Ok(products)
    }

    /// Find one product by id.
    ///
    /// Loads the whole catalog and filters locally; `Ok(None)` means the
    /// catalog loaded but has no such product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog could not be loaded.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.load_all().await?;
        Ok(find_by_id(&products, id).cloned())
    }

    /// Create a product.
    ///
    /// A success status is taken as confirmation; the response body is not
    /// inspected. The cached product list is dropped so the new product shows
    /// up on the next load.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` for a non-success status and
    /// `CatalogError::Http` if the backend could not be reached.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), CatalogError> {
        let response = self
            .inner
            .client
            .post(&self.inner.create_endpoint)
            .json(product)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                body = %excerpt(&body),
                "Catalog rejected new product"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        if let Some(cache) = &self.inner.cache {
            cache.invalidate(&CacheKey::AllProducts).await;
        }

        tracing::info!("product created");
        Ok(())
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;

    fn client(api_url: &str, ttl_secs: u64) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            api_url: Url::parse(api_url).unwrap(),
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }

    #[test]
    fn test_endpoints_ignore_trailing_slash() {
        let a = client("http://localhost:5000", 60);
        let b = client("http://localhost:5000/", 60);
        assert_eq!(a.inner.list_endpoint, "http://localhost:5000/api/getproduct");
        assert_eq!(b.inner.list_endpoint, a.inner.list_endpoint);
        assert_eq!(
            b.inner.create_endpoint,
            "http://localhost:5000/api/postProduct"
        );
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        assert!(client("http://localhost:5000", 0).inner.cache.is_none());
        assert!(client("http://localhost:5000", 5).inner.cache.is_some());
    }

    #[test]
    fn test_excerpt_truncates() {
        assert_eq!(excerpt(&"x".repeat(2_000)).len(), LOG_BODY_LIMIT);
        assert_eq!(excerpt("short"), "short");
    }
}
