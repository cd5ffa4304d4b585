pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250604_000001_initial_tables;
mod m20250604_000002_activity_analytics;
mod m20250702_000001_qr_status;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250604_000001_initial_tables::Migration),
            Box::new(m20250604_000002_activity_analytics::Migration),
            Box::new(m20250702_000001_qr_status::Migration),
        ]
    }
}
