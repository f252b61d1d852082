//! Catalog entities.
//!
//! Shops, brands, categories, products and their variants, as read from the
//! store. This crate never writes them.

mod category;
mod merchant;
mod product;

pub use category::Category;
pub use merchant::{Brand, Shop};
pub use product::{Product, ProductVariant};
