//! Submit-time validation for the storefront's forms.
//!
//! Each form is received as raw strings exactly as typed. `validate` either
//! returns the typed value the form describes or a [`FieldErrors`] map of
//! field name to message, which the view renders inline next to each input.
//! A form with any error must not be acted on.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::NewProduct;
use crate::types::{Category, Email};

/// Field name to error message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first message for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw add-product form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub stock: String,
    pub brand: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: String::new(),
            category: Category::default().as_str().to_string(),
            stock: String::new(),
            brand: String::new(),
        }
    }
}

impl ProductForm {
    /// Check every field and build the creation payload.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldErrors`] entry for each of: blank name, blank
    /// description, price that is blank, unparseable or not above zero,
    /// blank image URL, stock that is blank, fractional or negative, and an
    /// unknown category.
    pub fn validate(&self) -> Result<NewProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Product name is required");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert("description", "Description is required");
        }

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| *p > Decimal::ZERO);
        if price.is_none() {
            errors.insert("price", "Valid price is required");
        }

        let image = self.image.trim();
        if image.is_empty() {
            errors.insert("image", "Image URL is required");
        }

        let stock = self.stock.trim().parse::<u32>().ok();
        if stock.is_none() {
            errors.insert("stock", "Valid stock quantity is required");
        }

        let category = Category::from_str(&self.category).ok();
        if category.is_none() {
            errors.insert("category", "Select a valid category");
        }

        let brand = Some(self.brand.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        match (price, stock, category) {
            (Some(price), Some(stock), Some(category)) if errors.is_empty() => Ok(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                image: image.to_string(),
                category,
                stock,
                brand,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Raw sign-in form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns an `email` error when the address is blank or malformed.
    pub fn validate(&self) -> Result<Email, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = check_email(&self.email, &mut errors);
        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

/// Raw sign-up form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns an `email` error for a blank or malformed address and a
    /// `confirm` error when the two passwords differ.
    pub fn validate(&self) -> Result<Email, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = check_email(&self.email, &mut errors);
        if self.password != self.confirm {
            errors.insert("confirm", "Passwords do not match");
        }
        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

fn check_email(raw: &str, errors: &mut FieldErrors) -> Option<Email> {
    if raw.trim().is_empty() {
        errors.insert("email", "Email is required");
        return None;
    }
    match Email::parse(raw) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.insert("email", "Enter a valid email address");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: " Desk Lamp ".to_string(),
            description: "Warm light".to_string(),
            price: "799.99".to_string(),
            image: "https://img.example.com/lamp.jpg".to_string(),
            category: "home".to_string(),
            stock: "15".to_string(),
            brand: String::new(),
        }
    }

    #[test]
    fn test_valid_product_form() {
        let product = valid_form().validate().unwrap();
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, Decimal::new(79_999, 2));
        assert_eq!(product.stock, 15);
        assert_eq!(product.category, Category::Home);
        assert_eq!(product.brand, None);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let form = ProductForm {
            price: "0".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("price"), Some("Valid price is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bad_prices() {
        for price in ["", "-5", "abc", "  "] {
            let form = ProductForm {
                price: price.to_string(),
                ..valid_form()
            };
            assert!(form.validate().unwrap_err().contains("price"), "{price:?}");
        }
    }

    #[test]
    fn test_bad_stock() {
        for stock in ["", "-1", "2.5", "many"] {
            let form = ProductForm {
                stock: stock.to_string(),
                ..valid_form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(
                errors.get("stock"),
                Some("Valid stock quantity is required"),
                "{stock:?}"
            );
        }
        let form = ProductForm {
            stock: "0".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().stock, 0);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = ProductForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["description", "image", "name", "price", "stock"]);
    }

    #[test]
    fn test_unknown_category() {
        let form = ProductForm {
            category: "garden".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().contains("category"));
    }

    #[test]
    fn test_brand_is_trimmed_and_optional() {
        let form = ProductForm {
            brand: "  Lumen ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().brand.as_deref(), Some("Lumen"));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let form = SignupForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret-1".to_string(),
            confirm: "secret-2".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm"), Some("Passwords do not match"));
        assert!(!errors.contains("email"));
    }

    #[test]
    fn test_signup_valid() {
        let form = SignupForm {
            name: String::new(),
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
            confirm: "pw".to_string(),
        };
        assert_eq!(form.validate().unwrap().as_str(), "asha@example.com");
    }

    #[test]
    fn test_login_requires_email() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));

        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        assert_eq!(
            form.validate().unwrap_err().get("email"),
            Some("Enter a valid email address")
        );
    }
}
