//! Candidate filter: narrows the catalog to the items eligible for a draw.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, MenuItem};

/// A named exclusion filter over an item's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExclusionFilter {
    /// Drop items tagged `spicy`.
    #[serde(rename = "noSpicy")]
    NoSpicy,
    /// Keep only items tagged `soup`.
    #[serde(rename = "soupOnly")]
    SoupOnly,
}

impl ExclusionFilter {
    pub fn all() -> &'static [ExclusionFilter] {
        &[ExclusionFilter::NoSpicy, ExclusionFilter::SoupOnly]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExclusionFilter::NoSpicy => "noSpicy",
            ExclusionFilter::SoupOnly => "soupOnly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExclusionFilter::NoSpicy => "안 매운 것만",
            ExclusionFilter::SoupOnly => "국물 요리만",
        }
    }

    /// Accepts the camelCase key or a kebab-case spelling (`no-spicy`).
    pub fn from_key(key: &str) -> Option<ExclusionFilter> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.key().to_lowercase() == normalized)
    }

    /// Whether `item` passes this filter.
    pub fn allows(&self, item: &MenuItem) -> bool {
        match self {
            ExclusionFilter::NoSpicy => !item.has_tag("spicy"),
            ExclusionFilter::SoupOnly => item.has_tag("soup"),
        }
    }
}

/// The user's current category and filter selection.
///
/// The category set is never empty: toggling off the last selected
/// category is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFilters {
    categories: BTreeSet<Category>,
    filters: BTreeSet<ExclusionFilter>,
}

impl SelectionFilters {
    /// All categories selected, no filters active.
    pub fn new() -> Self {
        Self {
            categories: Category::all().iter().copied().collect(),
            filters: BTreeSet::new(),
        }
    }

    /// A selection limited to `categories`. Returns `None` if it is empty.
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Option<Self> {
        let categories: BTreeSet<Category> = categories.into_iter().collect();
        if categories.is_empty() {
            return None;
        }
        Some(Self {
            categories,
            filters: BTreeSet::new(),
        })
    }

    /// Toggle a category. Returns false if the toggle was refused because it
    /// would leave no category selected.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        if self.categories.contains(&category) {
            if self.categories.len() == 1 {
                return false;
            }
            self.categories.remove(&category);
        } else {
            self.categories.insert(category);
        }
        true
    }

    /// Toggle a filter. Returns whether it is now active.
    pub fn toggle_filter(&mut self, filter: ExclusionFilter) -> bool {
        if self.filters.remove(&filter) {
            false
        } else {
            self.filters.insert(filter);
            true
        }
    }

    pub fn set_filter(&mut self, filter: ExclusionFilter, active: bool) {
        if active {
            self.filters.insert(filter);
        } else {
            self.filters.remove(&filter);
        }
    }

    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    pub fn active_filters(&self) -> &BTreeSet<ExclusionFilter> {
        &self.filters
    }

    pub fn is_category_selected(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_filter_active(&self, filter: ExclusionFilter) -> bool {
        self.filters.contains(&filter)
    }
}

impl Default for SelectionFilters {
    fn default() -> Self {
        Self::new()
    }
}

/// Items whose category is selected, that pass every active filter, and
/// that are not disliked. Catalog order is preserved.
pub fn filter_candidates<'a>(
    items: &'a [MenuItem],
    categories: &BTreeSet<Category>,
    filters: &BTreeSet<ExclusionFilter>,
    dislikes: &BTreeSet<String>,
) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| categories.contains(&item.category))
        .filter(|item| filters.iter().all(|f| f.allows(item)))
        .filter(|item| !dislikes.contains(&item.id))
        .collect()
}

/// [`filter_candidates`] over a catalog and a selection.
pub fn eligible<'a>(
    catalog: &'a Catalog,
    selection: &SelectionFilters,
    dislikes: &BTreeSet<String>,
) -> Vec<&'a MenuItem> {
    filter_candidates(
        catalog.items(),
        selection.categories(),
        selection.active_filters(),
        dislikes,
    )
}
