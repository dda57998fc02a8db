//! Addon aggregate

pub mod model;
pub mod repository;

pub use model::Addon;
pub use repository::AddonRepository;
