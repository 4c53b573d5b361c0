//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// A product as served by the catalog backend.
///
/// Products are created by the backend and read-only here. Bookkeeping
/// fields the backend adds (`__v`, timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Absolute URL of the product image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Product {
    /// Unit price in the store currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::store(self.price)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a product through the catalog backend.
///
/// Built by [`crate::validation::ProductForm::validate`]; numeric fields go
/// over the wire as JSON numbers and an absent brand is omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Find a product by id in an already loaded product list.
#[must_use]
pub fn find_by_id<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_backend_document() {
        let doc = json!({
            "_id": "66b1f0c2a9",
            "name": "Headphones",
            "description": "Over-ear",
            "price": 1499.5,
            "image": "https://img.example.com/h.jpg",
            "category": "electronics",
            "stock": 12,
            "__v": 0,
            "createdAt": "2024-08-06T10:00:00Z"
        });

        let product: Product = serde_json::from_value(doc).unwrap();
        assert_eq!(product.id.as_str(), "66b1f0c2a9");
        assert_eq!(product.price, Decimal::new(14995, 1));
        assert_eq!(product.category, Category::Electronics);
        assert_eq!(product.stock, 12);
        assert!(product.brand.is_none());
        assert_eq!(product.unit_price().display(), "₹1499.50");
    }

    #[test]
    fn test_new_product_wire_format() {
        let payload = NewProduct {
            name: "Mug".to_string(),
            description: "Ceramic".to_string(),
            price: Decimal::new(2500, 2),
            image: "https://img.example.com/m.jpg".to_string(),
            category: Category::Home,
            stock: 3,
            brand: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["price"], json!(25.0));
        assert_eq!(value["stock"], json!(3));
        assert_eq!(value["category"], json!("home"));
        assert!(value.get("brand").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let products: Vec<Product> = serde_json::from_value(json!([
            {"_id": "a", "name": "A", "price": 1},
            {"_id": "b", "name": "B", "price": 2}
        ]))
        .unwrap();

        assert_eq!(
            find_by_id(&products, &ProductId::new("b")).map(|p| p.name.as_str()),
            Some("B")
        );
        assert!(find_by_id(&products, &ProductId::new("zzz")).is_none());
    }
}
