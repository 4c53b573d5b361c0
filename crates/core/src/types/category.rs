//! Product categories offered by the catalog.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
///
/// Serialized lowercase. Values the catalog backend sends that this build
/// does not know about are read as [`Category::Other`] so one odd product
/// cannot break the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Electronics,
    Clothing,
    Home,
    Books,
    Beauty,
    Sports,
    Toys,
    Food,
    #[serde(other)]
    Other,
}

impl Category {
    /// Every category, in the order the add-product form lists them.
    pub const ALL: [Self; 9] = [
        Self::Electronics,
        Self::Clothing,
        Self::Home,
        Self::Books,
        Self::Beauty,
        Self::Sports,
        Self::Toys,
        Self::Food,
        Self::Other,
    ];

    /// Wire and form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Home => "home",
            Self::Books => "books",
            Self::Beauty => "beauty",
            Self::Sports => "sports",
            Self::Toys => "toys",
            Self::Food => "food",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Home => "Home",
            Self::Books => "Books",
            Self::Beauty => "Beauty",
            Self::Sports => "Sports",
            Self::Toys => "Toys",
            Self::Food => "Food",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}
