//! SeaORM repository implementations

pub mod addon_repository;
pub mod booking_repository;
pub mod category_repository;
pub mod item_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Map a SeaORM error into the domain taxonomy.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}
