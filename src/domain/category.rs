//! Domain types representing spending categories.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Reserved category that can never be deleted and absorbs dangling references.
pub const UNCATEGORIZED_ID: &str = "uncategorized";

static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::with_id(UNCATEGORIZED_ID, "Uncategorized", "help-circle"),
        Category::with_id("food", "Food", "restaurant"),
        Category::with_id("transport", "Transport", "car"),
        Category::with_id("bills", "Bills", "receipt"),
        Category::with_id("entertainment", "Entertainment", "film"),
        Category::with_id("other", "Other", "ellipsis-horizontal"),
    ]
});

/// Categorises ledger activity for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    pub fn uncategorized() -> Self {
        DEFAULT_CATEGORIES[0].clone()
    }

    pub fn is_reserved(&self) -> bool {
        self.id == UNCATEGORIZED_ID
    }
}

/// The fixed set an empty category list is reset to, in its defined order.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.clone()
}

/// Case-insensitive lookup of a default category by display name.
pub fn default_category_id_by_name(name: &str) -> Option<&'static str> {
    let needle = name.trim().to_lowercase();
    DEFAULT_CATEGORIES
        .iter()
        .find(|category| category.name.to_lowercase() == needle)
        .map(|category| category.id.as_str())
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}

/// Partial category update: only supplied fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
}

impl CategoryPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_starts_with_reserved_category() {
        let defaults = default_categories();
        let names: Vec<_> = defaults.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Uncategorized", "Food", "Transport", "Bills", "Entertainment", "Other"]
        );
        assert!(defaults[0].is_reserved());
    }

    #[test]
    fn legacy_names_resolve_case_insensitively() {
        assert_eq!(default_category_id_by_name("FOOD"), Some("food"));
        assert_eq!(default_category_id_by_name(" bills "), Some("bills"));
        assert_eq!(default_category_id_by_name("Groceries"), None);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut category = Category::with_id("food", "Food", "restaurant");
        CategoryPatch::new("food").name("Dining").apply(&mut category);
        assert_eq!(category.name, "Dining");
        assert_eq!(category.icon, "restaurant");
    }
}
