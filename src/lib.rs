//! # Catalog Service
//!
//! Catalog and booking backend: categories, subcategories, items with
//! pluggable pricing strategies, add-ons, cascading tax resolution and
//! conflict-safe time-slot bookings.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic (catalog, pricing, tax, booking services)
//! - **infrastructure**: External concerns (SeaORM database, in-memory storage)
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::create_api_router;
