//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category in the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Materialized path of slugs from the root (e.g., "electronics/phones").
    pub path: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
        }
    }

    /// Path segments from the root down to this category.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Human-readable trail, e.g. "electronics › phones".
    pub fn breadcrumb(&self) -> String {
        self.segments().join(" \u{203a} ")
    }
}
