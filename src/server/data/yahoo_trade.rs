use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, SqlErr, TransactionTrait,
};

use crate::server::model::yahoo::ObservedTrade;

pub struct YahooTradeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> YahooTradeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_yahoo_id(
        &self,
        yahoo_trade_id: &str,
    ) -> Result<Option<entity::yahoo_trade::Model>, DbErr> {
        entity::prelude::YahooTrade::find()
            .filter(entity::yahoo_trade::Column::YahooTradeId.eq(yahoo_trade_id))
            .one(self.db)
            .await
    }

    /// Which of the given Yahoo transaction keys are already mirrored.
    pub async fn get_existing_yahoo_ids(&self, yahoo_trade_ids: &[String]) -> Result<HashSet<String>, DbErr> {
        let existing = entity::prelude::YahooTrade::find()
            .select_only()
            .column(entity::yahoo_trade::Column::YahooTradeId)
            .filter(entity::yahoo_trade::Column::YahooTradeId.is_in(yahoo_trade_ids.iter().cloned()))
            .into_tuple::<String>()
            .all(self.db)
            .await?;

        Ok(existing.into_iter().collect())
    }

    /// Mirrors a Yahoo trade together with its items.
    ///
    /// Returns `Ok(None)` when the transaction key is already mirrored, which includes losing
    /// the race against a concurrent insert of the same key.
    pub async fn create_with_items(
        &self,
        league_id: i32,
        trade: &ObservedTrade,
    ) -> Result<Option<entity::yahoo_trade::Model>, DbErr> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let mirrored = entity::yahoo_trade::ActiveModel {
            yahoo_trade_id: ActiveValue::Set(trade.transaction_key.clone()),
            league_id: ActiveValue::Set(league_id),
            trader_team_key: ActiveValue::Set(trade.trader_team_key.clone()),
            tradee_team_key: ActiveValue::Set(trade.tradee_team_key.clone()),
            status: ActiveValue::Set(trade.status.clone()),
            transaction_type: ActiveValue::Set(trade.transaction_type.clone()),
            proposed_at: ActiveValue::Set(trade.proposed_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let mirrored = match mirrored.insert(&txn).await {
            Ok(model) => model,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if !trade.items.is_empty() {
            let items = trade
                .items
                .iter()
                .map(|item| entity::yahoo_trade_item::ActiveModel {
                    yahoo_trade_id: ActiveValue::Set(mirrored.id),
                    player_key: ActiveValue::Set(item.player_key.clone()),
                    sender_team_key: ActiveValue::Set(item.sender_team_key.clone()),
                    receiver_team_key: ActiveValue::Set(item.receiver_team_key.clone()),
                    ..Default::default()
                });

            entity::prelude::YahooTradeItem::insert_many(items)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(Some(mirrored))
    }

    pub async fn update_status(
        &self,
        mirrored: entity::yahoo_trade::Model,
        status: &str,
    ) -> Result<entity::yahoo_trade::Model, DbErr> {
        let mut mirrored = mirrored.into_active_model();
        mirrored.status = ActiveValue::Set(status.to_string());
        mirrored.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        mirrored.update(self.db).await
    }

    pub async fn get_items(&self, mirrored_id: i32) -> Result<Vec<entity::yahoo_trade_item::Model>, DbErr> {
        entity::prelude::YahooTradeItem::find()
            .filter(entity::yahoo_trade_item::Column::YahooTradeId.eq(mirrored_id))
            .all(self.db)
            .await
    }
}
