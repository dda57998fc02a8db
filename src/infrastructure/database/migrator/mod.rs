//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_categories;
mod m20250101_000002_create_subcategories;
mod m20250101_000003_create_items;
mod m20250101_000004_create_addons;
mod m20250101_000005_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_categories::Migration),
            Box::new(m20250101_000002_create_subcategories::Migration),
            Box::new(m20250101_000003_create_items::Migration),
            Box::new(m20250101_000004_create_addons::Migration),
            Box::new(m20250101_000005_create_bookings::Migration),
        ]
    }
}
