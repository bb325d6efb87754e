//! One migrator per service: each service owns its own database and only
//! runs the migrations for its tables. Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_region;
mod m20240101_000002_create_comuna;
mod m20240101_000003_create_address;
mod m20240101_000009_add_geography_indexes;
mod m20240102_000001_create_category;
mod m20240102_000002_create_status;
mod m20240102_000003_create_product;
mod m20240102_000009_add_products_indexes;
mod m20240103_000001_create_buy;
mod m20240103_000002_create_detail;
mod m20240103_000009_add_shopping_indexes;
mod m20240104_000001_create_role;
mod m20240104_000002_create_user;
mod m20240104_000009_add_users_indexes;

/// regions, comunas, addresses
pub struct GeographyMigrator;

#[async_trait::async_trait]
impl MigratorTrait for GeographyMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_region::Migration),
            Box::new(m20240101_000002_create_comuna::Migration),
            Box::new(m20240101_000003_create_address::Migration),
            Box::new(m20240101_000009_add_geography_indexes::Migration),
        ]
    }
}

/// categories, statuses, products
pub struct ProductsMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ProductsMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240102_000001_create_category::Migration),
            Box::new(m20240102_000002_create_status::Migration),
            Box::new(m20240102_000003_create_product::Migration),
            Box::new(m20240102_000009_add_products_indexes::Migration),
        ]
    }
}

/// buys, details
pub struct ShoppingMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ShoppingMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240103_000001_create_buy::Migration),
            Box::new(m20240103_000002_create_detail::Migration),
            Box::new(m20240103_000009_add_shopping_indexes::Migration),
        ]
    }
}

/// roles, users
pub struct UsersMigrator;

#[async_trait::async_trait]
impl MigratorTrait for UsersMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240104_000001_create_role::Migration),
            Box::new(m20240104_000002_create_user::Migration),
            Box::new(m20240104_000009_add_users_indexes::Migration),
        ]
    }
}
