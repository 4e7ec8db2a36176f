use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An asset exchanged in a marketplace trade.
///
/// Stored as JSON on the trade row, e.g. `{"kind":"PLAYER","playerId":12,"fromTeamId":3}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(tag = "kind")]
pub enum TradeAsset {
    #[serde(rename = "PLAYER", rename_all = "camelCase")]
    Player { player_id: i32, from_team_id: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeScopeDto {
    Marketplace,
    Direct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatusDto {
    Open,
    Negotiating,
    Accepted,
    Rejected,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    pub id: i32,
    pub initiator_id: i32,
    pub target_user_id: Option<i32>,
    pub parent_trade_id: Option<i32>,
    pub scope: TradeScopeDto,
    pub status: TradeStatusDto,
    pub offered_assets: Vec<TradeAsset>,
    pub requested_assets: Vec<TradeAsset>,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for creating a listing, a direct proposal, or an offer on a listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradeDto {
    pub scope: TradeScopeDto,
    #[serde(default)]
    pub target_user_id: Option<i32>,
    /// Listing this trade is an offer on
    #[serde(default)]
    pub parent_trade_id: Option<i32>,
    pub offered_assets: Vec<TradeAsset>,
    #[serde(default)]
    pub requested_assets: Vec<TradeAsset>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A marketplace listing together with the offers it has received
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListingDto {
    pub listing: TradeDto,
    pub offers: Vec<TradeDto>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradeDashboardDto {
    /// The user's open marketplace listings
    pub listings: Vec<ListingDto>,
    /// Pending trades addressed to the user
    pub offers_received: Vec<TradeDto>,
    /// Pending trades the user proposed
    pub offers_sent: Vec<TradeDto>,
}
