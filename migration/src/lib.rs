pub use sea_orm_migration::prelude::*;

mod m20251101_000001_huddle_user;
mod m20251101_000002_fantasy_league;
mod m20251101_000003_trade;
mod m20251101_000004_yahoo_trade;
mod m20251101_000005_player_news;
mod m20251101_000006_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_huddle_user::Migration),
            Box::new(m20251101_000002_fantasy_league::Migration),
            Box::new(m20251101_000003_trade::Migration),
            Box::new(m20251101_000004_yahoo_trade::Migration),
            Box::new(m20251101_000005_player_news::Migration),
            Box::new(m20251101_000006_notification::Migration),
        ]
    }
}
