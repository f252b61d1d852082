//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a BrandId where a CategoryId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over the catalog's integer keys.
macro_rules! define_id {
    ($name:ident) => {
        /// A catalog row identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from its integer key.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the integer key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for turbo_db::Value {
            fn from(id: $name) -> Self {
                turbo_db::Value::Integer(id.0)
            }
        }
    };
}

define_id!(ShopId);
define_id!(BrandId);
define_id!(CategoryId);
define_id!(ProductId);
define_id!(VariantId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(123);
        assert_eq!(id.get(), 123);
    }

    #[test]
    fn test_id_from_integer() {
        let id: BrandId = 456.into();
        assert_eq!(id, BrandId::new(456));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", CategoryId::new(789)), "789");
    }

    #[test]
    fn test_id_binds_as_integer() {
        assert_eq!(turbo_db::Value::from(ShopId::new(9)), turbo_db::Value::Integer(9));
    }

    #[test]
    fn test_id_serializes_transparently() {
        assert_eq!(serde_json::to_string(&VariantId::new(5)).unwrap(), "5");
    }
}
