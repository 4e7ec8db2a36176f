use chrono::Utc;
use entity::sea_orm_active_enums::{TradeScope, TradeStatus};
use sea_orm::{ActiveModelTrait, ActiveValue};
use serde_json::json;

use crate::{error::TestError, TestContext};

pub struct TradeFixtures<'a> {
    setup: &'a TestContext,
}

impl TestContext {
    pub fn trade(&self) -> TradeFixtures<'_> {
        TradeFixtures { setup: self }
    }
}

impl<'a> TradeFixtures<'a> {
    /// Inserts a trade offering a single player.
    ///
    /// Listings are inserted with `scope` MARKETPLACE and no target, offers with DIRECT, a
    /// target and optionally the listing as `parent_trade_id`.
    pub async fn insert_trade(
        &self,
        initiator_id: i32,
        target_user_id: Option<i32>,
        parent_trade_id: Option<i32>,
        scope: TradeScope,
        status: TradeStatus,
        offered: (i32, i32),
    ) -> Result<entity::trade::Model, TestError> {
        let now = Utc::now().naive_utc();
        let (player_id, from_team_id) = offered;

        let trade = entity::trade::ActiveModel {
            initiator_id: ActiveValue::Set(initiator_id),
            target_user_id: ActiveValue::Set(target_user_id),
            parent_trade_id: ActiveValue::Set(parent_trade_id),
            scope: ActiveValue::Set(scope),
            status: ActiveValue::Set(status),
            offered_assets: ActiveValue::Set(json!([
                { "kind": "PLAYER", "playerId": player_id, "fromTeamId": from_team_id }
            ])),
            requested_assets: ActiveValue::Set(json!([])),
            message: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(trade.insert(&self.setup.db).await?)
    }

    /// Inserts an OPEN marketplace listing.
    pub async fn insert_listing(
        &self,
        initiator_id: i32,
        offered: (i32, i32),
    ) -> Result<entity::trade::Model, TestError> {
        self.insert_trade(
            initiator_id,
            None,
            None,
            TradeScope::Marketplace,
            TradeStatus::Open,
            offered,
        )
        .await
    }

    /// Inserts an OPEN direct trade addressed to `target_user_id`.
    pub async fn insert_direct(
        &self,
        initiator_id: i32,
        target_user_id: i32,
        offered: (i32, i32),
    ) -> Result<entity::trade::Model, TestError> {
        self.insert_trade(
            initiator_id,
            Some(target_user_id),
            None,
            TradeScope::Direct,
            TradeStatus::Open,
            offered,
        )
        .await
    }
}
