//! Menu catalog: the static, build-time-embedded lunch menu table.
//!
//! The catalog is parsed once from `menu.yaml` and never mutated afterwards.
//! Item ids are unique; display names may repeat across categories.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_MENU: &str = include_str!("menu.yaml");

/// A selectable menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Korean,
    Chinese,
    Japanese,
    Western,
    Snack,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Korean,
            Category::Chinese,
            Category::Japanese,
            Category::Western,
            Category::Snack,
        ]
    }

    /// Stable key, as used in the catalog data.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Korean => "korean",
            Category::Chinese => "chinese",
            Category::Japanese => "japanese",
            Category::Western => "western",
            Category::Snack => "snack",
        }
    }

    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Korean => "한식",
            Category::Chinese => "중식",
            Category::Japanese => "일식",
            Category::Western => "양식",
            Category::Snack => "분식",
        }
    }

    /// English display label.
    pub fn label_en(&self) -> &'static str {
        match self {
            Category::Korean => "Korean",
            Category::Chinese => "Chinese",
            Category::Japanese => "Japanese",
            Category::Western => "Western",
            Category::Snack => "Snack",
        }
    }

    /// Look up a category by its key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Category> {
        let lower = key.trim().to_lowercase();
        Self::all().iter().copied().find(|c| c.key() == lower)
    }
}

/// A single lunch menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    /// Korean display name.
    pub name: String,
    /// English display name.
    #[serde(default)]
    pub name_en: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl MenuItem {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate menu id: {0}")]
    DuplicateId(String),
    #[error("catalog contains no menu items")]
    Empty,
}

/// The immutable menu table.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml(EMBEDDED_MENU)
    }

    /// Parse a catalog from YAML. Unknown category keys fail here.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_yaml::from_str(source)?;
        Self::from_items(items)
    }

    /// Build a catalog from items, validating id uniqueness.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::item;
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() > 20);
        for category in Category::all() {
            assert!(
                catalog.by_category(*category).next().is_some(),
                "no items for {}",
                category.key()
            );
        }
    }

    #[test]
    fn embedded_items_have_both_names() {
        let catalog = Catalog::embedded().unwrap();
        for item in catalog.items() {
            assert!(!item.name.is_empty(), "{} has no Korean name", item.id);
            assert!(!item.name_en.is_empty(), "{} has no English name", item.id);
            assert!(item.name_en.is_ascii(), "{} English name is not ASCII", item.id);
        }
        assert_eq!(catalog.get("jjajangmyeon").unwrap().name_en, "Black Bean Noodles");
    }

    #[test]
    fn english_name_is_optional_in_data() {
        let yaml = "- id: x\n  name: 엑스\n  category: snack\n";
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.get("x").unwrap().name_en, "");
    }

    #[test]
    fn embedded_catalog_has_repeated_names() {
        let catalog = Catalog::embedded().unwrap();
        let rice: Vec<&MenuItem> = catalog
            .items()
            .iter()
            .filter(|item| item.name == "볶음밥")
            .collect();
        assert_eq!(rice.len(), 2);
        assert_ne!(rice[0].id, rice[1].id);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Catalog::from_items(vec![
            item("a", Category::Korean, &[]),
            item("a", Category::Snack, &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            Catalog::from_items(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn unknown_category_is_parse_error() {
        let yaml = "- id: x\n  name: X\n  category: french\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn optional_fields_default() {
        let yaml = "- id: x\n  name: X\n  category: snack\n";
        let catalog = Catalog::from_yaml(yaml).unwrap();
        let x = catalog.get("x").unwrap();
        assert!(x.tags.is_empty());
        assert!(x.icon.is_empty());
    }

    #[test]
    fn category_keys_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_key(category.key()), Some(*category));
        }
        assert_eq!(Category::from_key(" Korean "), Some(Category::Korean));
        assert_eq!(Category::from_key("french"), None);
    }

    #[test]
    fn has_tag_matches_exactly() {
        let x = item("x", Category::Korean, &["spicy", "soup"]);
        assert!(x.has_tag("spicy"));
        assert!(!x.has_tag("spic"));
    }
}
