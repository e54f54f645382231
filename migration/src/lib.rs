pub use sea_orm_migration::prelude::*;

mod m20260829_000001_create_accounts;
mod m20260829_000002_create_sessions;
mod m20260829_000003_create_verification_codes;
mod m20260829_000004_create_reward_events;
mod m20260829_000005_create_withdrawals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_create_accounts::Migration),
            Box::new(m20260829_000002_create_sessions::Migration),
            Box::new(m20260829_000003_create_verification_codes::Migration),
            Box::new(m20260829_000004_create_reward_events::Migration),
            Box::new(m20260829_000005_create_withdrawals::Migration),
        ]
    }
}
