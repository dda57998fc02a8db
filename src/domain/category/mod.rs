//! Category aggregate (categories + subcategories)

pub mod model;
pub mod repository;

pub use model::{Category, Subcategory};
pub use repository::{CategoryRepository, SubcategoryRepository};
