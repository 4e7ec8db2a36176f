use serde::{Deserialize, Serialize};

/// Action the user is carrying out on Yahoo's own trade pages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    /// A new proposal from the source team to the target team covering exactly `player_keys`
    #[serde(rename_all = "camelCase")]
    Propose {
        source_team_key: String,
        target_team_key: String,
        player_keys: Vec<String>,
        /// Unix time the proposal URL was issued. Pending trades proposed earlier are ignored.
        #[serde(default)]
        not_before: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Accept { yahoo_trade_id: String },
    #[serde(rename_all = "camelCase")]
    Reject { yahoo_trade_id: String },
    #[serde(rename_all = "camelCase")]
    Cancel { yahoo_trade_id: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequestDto {
    pub league_id: i32,
    pub action: TradeAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResultDto {
    /// Yahoo reports the state the action was expected to produce
    pub matched: bool,
    /// Yahoo transaction key of the reconciled trade, once matched
    pub yahoo_trade_id: Option<String>,
    /// Latest status observed on Yahoo, if the trade was found
    pub observed_status: Option<String>,
}

/// Request body for building the Yahoo "propose trade" page URL
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUrlRequestDto {
    pub source_team_id: i32,
    pub target_team_id: i32,
    pub offered_player_ids: Vec<i32>,
    pub requested_player_ids: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUrlDto {
    pub url: String,
    /// Request to poll with while the user completes the proposal on Yahoo
    pub verification: VerificationRequestDto,
}
