pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_eve_corporation_table;
mod m20251101_000002_create_eve_character_table;
mod m20251101_000003_create_recruit_user_table;
mod m20251101_000004_create_recruit_user_character_table;
mod m20251101_000005_create_application_table;
mod m20251101_000006_create_application_language_table;
mod m20251101_000007_create_application_interest_table;
mod m20251101_000008_create_seat_role_table;
mod m20251101_000009_create_seat_role_user_table;
mod m20251101_000010_create_seat_role_permission_table;
mod m20251101_000011_create_setting_table;
mod m20251101_000012_create_corporation_stats_table;
mod m20251101_000013_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_eve_corporation_table::Migration),
            Box::new(m20251101_000002_create_eve_character_table::Migration),
            Box::new(m20251101_000003_create_recruit_user_table::Migration),
            Box::new(m20251101_000004_create_recruit_user_character_table::Migration),
            Box::new(m20251101_000005_create_application_table::Migration),
            Box::new(m20251101_000006_create_application_language_table::Migration),
            Box::new(m20251101_000007_create_application_interest_table::Migration),
            Box::new(m20251101_000008_create_seat_role_table::Migration),
            Box::new(m20251101_000009_create_seat_role_user_table::Migration),
            Box::new(m20251101_000010_create_seat_role_permission_table::Migration),
            Box::new(m20251101_000011_create_setting_table::Migration),
            Box::new(m20251101_000012_create_corporation_stats_table::Migration),
            Box::new(m20251101_000013_create_notification_table::Migration),
        ]
    }
}
