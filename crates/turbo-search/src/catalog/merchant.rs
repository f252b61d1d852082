//! Shops and brands.

use crate::ids::{BrandId, ShopId};
use serde::{Deserialize, Serialize};

/// A shop offering products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
}

impl Shop {
    pub fn new(id: ShopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A product brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

impl Brand {
    pub fn new(id: BrandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
