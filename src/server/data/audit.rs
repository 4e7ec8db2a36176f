//! Append-only audit records written alongside trade status changes.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct LedgerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        amount: i32,
        reason: &str,
        trade_id: Option<i32>,
    ) -> Result<entity::ledger::Model, DbErr> {
        let entry = entity::ledger::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            amount: ActiveValue::Set(amount),
            reason: ActiveValue::Set(reason.to_string()),
            trade_id: ActiveValue::Set(trade_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entry.insert(self.db).await
    }
}

pub struct TradeHistoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TradeHistoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        trade_id: i32,
        snapshot: serde_json::Value,
    ) -> Result<entity::trade_history::Model, DbErr> {
        let entry = entity::trade_history::ActiveModel {
            trade_id: ActiveValue::Set(trade_id),
            snapshot: ActiveValue::Set(snapshot),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entry.insert(self.db).await
    }
}
