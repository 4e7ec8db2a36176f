use serde::{Deserialize, Serialize};

/// Result of mirroring a league's Yahoo trades
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TradeSyncDto {
    /// Trades reported by Yahoo
    pub fetched: usize,
    /// Trades newly mirrored on this pass
    pub inserted: usize,
    /// Trades already mirrored by an earlier pass
    pub skipped: usize,
}

/// Result of syncing a team roster
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RosterSyncDto {
    pub team_id: i32,
    pub players: usize,
}
