//! Topic categories (ESG pillars and sub-pillars).
//!
//! # Responsibility
//! - Define the shared category record referenced by topics.
//! - Validate display colors before they reach the presentation layer.
//!
//! # Invariants
//! - Topics reference categories by `CategoryId`; a category is never owned
//!   by a topic.
//! - `color` is always a `#RRGGBB` hex string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Stable category key, e.g. `environmental`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Normalizes to trimmed lowercase; returns `None` for blank input.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for category construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    InvalidId(String),
    BlankName,
    InvalidColor(String),
    Duplicate(CategoryId),
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "category id is invalid: `{value}`"),
            Self::BlankName => write!(f, "category name must not be blank"),
            Self::InvalidColor(value) => {
                write!(f, "category color must be #RRGGBB, got `{value}`")
            }
            Self::Duplicate(id) => write!(f, "category already registered: {id}"),
        }
    }
}

impl Error for CategoryError {}

/// Category with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// `#RRGGBB`, used for dot fill.
    pub color: String,
}

impl Category {
    pub fn new(
        id: &str,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, CategoryError> {
        let category_id =
            CategoryId::parse(id).ok_or_else(|| CategoryError::InvalidId(id.to_string()))?;
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CategoryError::BlankName);
        }
        let color = color.into();
        if !is_hex_color(&color) {
            return Err(CategoryError::InvalidColor(color));
        }
        Ok(Self {
            id: category_id,
            name,
            color,
        })
    }
}

/// Returns whether `value` is a `#RRGGBB` color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Lookup table of categories shared by many topics.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: BTreeMap<CategoryId, Category>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, category: Category) -> Result<(), CategoryError> {
        if self.categories.contains_key(&category.id) {
            return Err(CategoryError::Duplicate(category.id));
        }
        self.categories.insert(category.id.clone(), category);
        Ok(())
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Dot color for a category, falling back to neutral gray when unknown.
    pub fn color_of(&self, id: &CategoryId) -> &str {
        self.get(id)
            .map(|category| category.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Color used for topics whose category is not registered.
pub const FALLBACK_COLOR: &str = "#9CA3AF";

#[cfg(test)]
mod tests {
    use super::{Category, CategoryCatalog, CategoryError, CategoryId};

    #[test]
    fn new_normalizes_id_and_validates_color() {
        let category = Category::new(" Environmental ", "Environmental", "#10B981").unwrap();
        assert_eq!(category.id.as_str(), "environmental");

        let err = Category::new("social", "Social", "blue").unwrap_err();
        assert_eq!(err, CategoryError::InvalidColor("blue".to_string()));
    }

    #[test]
    fn catalog_rejects_duplicates_and_falls_back_on_unknown() {
        let mut catalog = CategoryCatalog::new();
        catalog
            .register(Category::new("governance", "Governance", "#6366F1").unwrap())
            .unwrap();
        let err = catalog
            .register(Category::new("governance", "Gov", "#000000").unwrap())
            .unwrap_err();
        assert!(matches!(err, CategoryError::Duplicate(_)));

        let unknown = CategoryId::parse("unknown").unwrap();
        assert_eq!(catalog.color_of(&unknown), super::FALLBACK_COLOR);
    }

    #[test]
    fn catalog_iterates_in_id_order() {
        let mut catalog = CategoryCatalog::new();
        for (id, color) in [("social", "#3B82F6"), ("environmental", "#10B981")] {
            catalog.register(Category::new(id, id, color).unwrap()).unwrap();
        }
        let ids: Vec<_> = catalog.iter().map(|category| category.id.as_str()).collect();
        assert_eq!(ids, vec!["environmental", "social"]);
        assert!(!catalog.is_empty());
    }
}
