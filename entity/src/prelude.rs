pub use super::fantasy_game::Entity as FantasyGame;
pub use super::fantasy_league::Entity as FantasyLeague;
pub use super::fantasy_player::Entity as FantasyPlayer;
pub use super::fantasy_team::Entity as FantasyTeam;
pub use super::fantasy_team_player::Entity as FantasyTeamPlayer;
pub use super::huddle_account::Entity as HuddleAccount;
pub use super::huddle_user::Entity as HuddleUser;
pub use super::ledger::Entity as Ledger;
pub use super::notification::Entity as Notification;
pub use super::player_follow::Entity as PlayerFollow;
pub use super::player_news::Entity as PlayerNews;
pub use super::trade::Entity as Trade;
pub use super::trade_history::Entity as TradeHistory;
pub use super::yahoo_trade::Entity as YahooTrade;
pub use super::yahoo_trade_item::Entity as YahooTradeItem;
