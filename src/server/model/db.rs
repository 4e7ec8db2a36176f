//! Database model type aliases.

pub type UserModel = entity::huddle_user::Model;

/// Provider account linked to a user, holds the Yahoo OAuth tokens
pub type AccountModel = entity::huddle_account::Model;

pub type LeagueModel = entity::fantasy_league::Model;

pub type TeamModel = entity::fantasy_team::Model;

pub type PlayerModel = entity::fantasy_player::Model;

/// Internal marketplace trade, either a listing or an offer
pub type TradeModel = entity::trade::Model;

/// Mirror of a trade observed on Yahoo
pub type YahooTradeModel = entity::yahoo_trade::Model;

pub type YahooTradeItemModel = entity::yahoo_trade_item::Model;

pub type PlayerNewsModel = entity::player_news::Model;

pub type NotificationModel = entity::notification::Model;
