//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_properties;
mod m20250101_000002_create_rooms;
mod m20250101_000003_create_guests;
mod m20250101_000004_create_bookings;
mod m20250101_000005_create_room_blocked_dates;
mod m20250101_000006_create_price_overrides;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_properties::Migration),
            Box::new(m20250101_000002_create_rooms::Migration),
            Box::new(m20250101_000003_create_guests::Migration),
            Box::new(m20250101_000004_create_bookings::Migration),
            Box::new(m20250101_000005_create_room_blocked_dates::Migration),
            Box::new(m20250101_000006_create_price_overrides::Migration),
        ]
    }
}
