use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_artist_profiles;
mod m20260301_000003_create_service_categories;
mod m20260301_000004_create_services;
mod m20260301_000005_create_availabilities;
mod m20260301_000006_create_bookings;
mod m20260301_000007_create_payments;
mod m20260301_000008_create_reviews;
mod m20260301_000009_create_organizations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_artist_profiles::Migration),
            Box::new(m20260301_000003_create_service_categories::Migration),
            Box::new(m20260301_000004_create_services::Migration),
            Box::new(m20260301_000005_create_availabilities::Migration),
            Box::new(m20260301_000006_create_bookings::Migration),
            Box::new(m20260301_000007_create_payments::Migration),
            Box::new(m20260301_000008_create_reviews::Migration),
            Box::new(m20260301_000009_create_organizations::Migration),
        ]
    }
}
