//! Catalog backend client.
//!
//! # Architecture
//!
//! - The catalog backend is the source of truth for products; nothing is
//!   stored locally beyond a short-lived in-memory copy of the product list
//! - `GET /api/getproduct` returns the whole catalog; single products are
//!   picked out of that list client-side (there is no lookup-by-id endpoint)
//! - `POST /api/postProduct` creates a product
//! - Failed requests are reported, never retried
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.catalog);
//! let products = catalog.load_all().await?;
//! let product = catalog.find_by_id(&ProductId::new("66b1f0c2")).await?;
//! ```

mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the response not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("catalog returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether the backend was reached at all.
    ///
    /// The add-product form words its alert differently for "the server said
    /// no" and "the server could not be reached".
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "catalog returned status 503"
        );
    }

    #[test]
    fn test_status_error_is_not_transport() {
        assert!(!CatalogError::Status(500).is_transport());
        let parse = serde_json::from_str::<u8>("x").map_err(CatalogError::from);
        assert!(parse.is_err_and(|e| !e.is_transport()));
    }
}
