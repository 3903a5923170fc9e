pub use sea_orm_migration::prelude::*;

mod m20260806_000001_registrations;
mod m20260806_000002_otp_challenges;
mod m20260806_000003_admin_sessions;

pub struct Migrator;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260806_000001_registrations::Migration),
            Box::new(m20260806_000002_otp_challenges::Migration),
            Box::new(m20260806_000003_admin_sessions::Migration),
        ]
    }
}
