use chrono::Utc;
use entity::sea_orm_active_enums::{TradeScope, TradeStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Statuses of a trade that can still be acted on
pub const ACTIVE_STATUSES: [TradeStatus; 2] = [TradeStatus::Open, TradeStatus::Negotiating];

/// Fields of a new trade, created with status OPEN.
pub struct CreateTradeParams {
    pub initiator_id: i32,
    pub target_user_id: Option<i32>,
    pub parent_trade_id: Option<i32>,
    pub scope: TradeScope,
    pub offered_assets: serde_json::Value,
    pub requested_assets: serde_json::Value,
    pub message: Option<String>,
}

pub struct TradeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TradeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateTradeParams) -> Result<entity::trade::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let trade = entity::trade::ActiveModel {
            initiator_id: ActiveValue::Set(params.initiator_id),
            target_user_id: ActiveValue::Set(params.target_user_id),
            parent_trade_id: ActiveValue::Set(params.parent_trade_id),
            scope: ActiveValue::Set(params.scope),
            status: ActiveValue::Set(TradeStatus::Open),
            offered_assets: ActiveValue::Set(params.offered_assets),
            requested_assets: ActiveValue::Set(params.requested_assets),
            message: ActiveValue::Set(params.message),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        trade.insert(self.db).await
    }

    pub async fn get_by_id(&self, trade_id: i32) -> Result<Option<entity::trade::Model>, DbErr> {
        entity::prelude::Trade::find_by_id(trade_id).one(self.db).await
    }

    /// Sets the status of a trade. Transition rules are enforced by the caller.
    pub async fn update_status(
        &self,
        trade: entity::trade::Model,
        status: TradeStatus,
    ) -> Result<entity::trade::Model, DbErr> {
        let mut trade = trade.into_active_model();
        trade.status = ActiveValue::Set(status);
        trade.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        trade.update(self.db).await
    }

    /// Active offers made against any of the listings.
    pub async fn get_active_offers_for(
        &self,
        listing_ids: &[i32],
    ) -> Result<Vec<entity::trade::Model>, DbErr> {
        entity::prelude::Trade::find()
            .filter(entity::trade::Column::ParentTradeId.is_in(listing_ids.iter().copied()))
            .filter(entity::trade::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_desc(entity::trade::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Active marketplace listings created by the user.
    pub async fn get_active_listings_by(&self, user_id: i32) -> Result<Vec<entity::trade::Model>, DbErr> {
        entity::prelude::Trade::find()
            .filter(entity::trade::Column::InitiatorId.eq(user_id))
            .filter(entity::trade::Column::Scope.eq(TradeScope::Marketplace))
            .filter(entity::trade::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_desc(entity::trade::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Active direct trades addressed to the user.
    pub async fn get_active_received_by(&self, user_id: i32) -> Result<Vec<entity::trade::Model>, DbErr> {
        entity::prelude::Trade::find()
            .filter(entity::trade::Column::TargetUserId.eq(user_id))
            .filter(entity::trade::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_desc(entity::trade::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Active direct trades the user made.
    pub async fn get_active_sent_by(&self, user_id: i32) -> Result<Vec<entity::trade::Model>, DbErr> {
        entity::prelude::Trade::find()
            .filter(entity::trade::Column::InitiatorId.eq(user_id))
            .filter(entity::trade::Column::Scope.eq(TradeScope::Direct))
            .filter(entity::trade::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_desc(entity::trade::Column::CreatedAt)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::{TradeScope, TradeStatus};
    use huddle_test_utils::prelude::*;
    use serde_json::json;

    use crate::server::data::trade::{CreateTradeParams, TradeRepository};

    /// Expect new trades to start OPEN
    #[tokio::test]
    async fn creates_open_trade() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let alice = test.user().insert_user("alice").await?;

        let trade = TradeRepository::new(&test.db)
            .create(CreateTradeParams {
                initiator_id: alice.id,
                target_user_id: None,
                parent_trade_id: None,
                scope: TradeScope::Marketplace,
                offered_assets: json!([{ "kind": "PLAYER", "playerId": 1, "fromTeamId": 1 }]),
                requested_assets: json!([]),
                message: Some("LF guard".to_string()),
            })
            .await?;

        assert_eq!(trade.status, TradeStatus::Open);
        assert_eq!(trade.scope, TradeScope::Marketplace);

        Ok(())
    }

    /// Expect terminal trades to be left out of the active queries
    #[tokio::test]
    async fn active_queries_skip_terminal_trades() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let alice = test.user().insert_user("alice").await?;
        let bob = test.user().insert_user("bob").await?;
        let listing = test.trade().insert_listing(alice.id, (1, 1)).await?;
        let offer = test
            .trade()
            .insert_trade(
                bob.id,
                Some(alice.id),
                Some(listing.id),
                TradeScope::Direct,
                TradeStatus::Open,
                (2, 2),
            )
            .await?;
        test.trade()
            .insert_trade(
                bob.id,
                Some(alice.id),
                Some(listing.id),
                TradeScope::Direct,
                TradeStatus::Rejected,
                (3, 2),
            )
            .await?;

        let repo = TradeRepository::new(&test.db);

        let listings = repo.get_active_listings_by(alice.id).await?;
        assert_eq!(listings.iter().map(|t| t.id).collect::<Vec<_>>(), vec![listing.id]);

        let offers = repo.get_active_offers_for(&[listing.id]).await?;
        assert_eq!(offers.iter().map(|t| t.id).collect::<Vec<_>>(), vec![offer.id]);

        let received = repo.get_active_received_by(alice.id).await?;
        assert_eq!(received.len(), 1);

        let sent = repo.get_active_sent_by(bob.id).await?;
        assert_eq!(sent.len(), 1);
        assert!(repo.get_active_sent_by(alice.id).await?.is_empty());

        Ok(())
    }

    /// Expect the status to be persisted
    #[tokio::test]
    async fn updates_status() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let alice = test.user().insert_user("alice").await?;
        let listing = test.trade().insert_listing(alice.id, (1, 1)).await?;

        let repo = TradeRepository::new(&test.db);
        repo.update_status(listing.clone(), TradeStatus::Cancelled)
            .await?;

        let stored = repo.get_by_id(listing.id).await?.unwrap();
        assert_eq!(stored.status, TradeStatus::Cancelled);

        Ok(())
    }
}
