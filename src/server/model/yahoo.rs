use std::collections::BTreeSet;

use chrono::NaiveDateTime;

/// Transaction type of a completed trade
pub const TRANSACTION_TYPE_TRADE: &str = "trade";
/// Transaction type of a trade awaiting a response
pub const TRANSACTION_TYPE_PENDING_TRADE: &str = "pending_trade";

/// A trade transaction as reported by the Yahoo API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedTrade {
    /// Yahoo transaction key, e.g. `466.l.12345.pt.3`, unique across Yahoo
    pub transaction_key: String,
    pub transaction_type: String,
    /// Raw Yahoo status such as `proposed`, `accepted`, `successful`
    pub status: String,
    pub trader_team_key: String,
    pub tradee_team_key: String,
    pub proposed_at: Option<NaiveDateTime>,
    pub items: Vec<ObservedTradeItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedTradeItem {
    pub player_key: String,
    pub sender_team_key: String,
    pub receiver_team_key: String,
}

impl ObservedTrade {
    pub fn is_pending(&self) -> bool {
        self.transaction_type == TRANSACTION_TYPE_PENDING_TRADE
    }

    /// Distinct player keys moved by the trade, in either direction.
    pub fn player_keys(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .map(|item| item.player_key.as_str())
            .collect()
    }

    /// Whether `trader_team_key` proposed the trade to `tradee_team_key`.
    pub fn is_proposal_from(&self, trader_team_key: &str, tradee_team_key: &str) -> bool {
        self.trader_team_key == trader_team_key && self.tradee_team_key == tradee_team_key
    }

    /// Whether Yahoo reports the trade as proposed at or after the Unix timestamp `since`.
    ///
    /// False when Yahoo gave no proposal time.
    pub fn proposed_since(&self, since: i64) -> bool {
        self.proposed_at
            .is_some_and(|proposed_at| proposed_at.and_utc().timestamp() >= since)
    }
}

/// A player as listed on a Yahoo team roster.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservedPlayer {
    pub player_key: String,
    pub full_name: String,
    pub position: Option<String>,
    pub status: Option<String>,
}
