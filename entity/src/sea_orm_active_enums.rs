use sea_orm::entity::prelude::*;

/// Visibility of a marketplace trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TradeScope {
    /// Public listing any user may respond to with an offer
    #[sea_orm(string_value = "MARKETPLACE")]
    Marketplace,
    /// Proposal addressed to a single user
    #[sea_orm(string_value = "DIRECT")]
    Direct,
}

/// Lifecycle of a marketplace trade.
///
/// `Accepted`, `Rejected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TradeStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "NEGOTIATING")]
    Negotiating,
    #[sea_orm(string_value = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl TradeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum NotificationKind {
    #[sea_orm(string_value = "SYSTEM")]
    System,
    #[sea_orm(string_value = "TRADE")]
    Trade,
    #[sea_orm(string_value = "CLAN")]
    Clan,
    #[sea_orm(string_value = "OTHER")]
    Other,
}
