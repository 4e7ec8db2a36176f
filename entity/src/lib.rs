//! SeaORM entities for the Huddle schema.

pub mod prelude;

pub mod fantasy_game;
pub mod fantasy_league;
pub mod fantasy_player;
pub mod fantasy_team;
pub mod fantasy_team_player;
pub mod huddle_account;
pub mod huddle_user;
pub mod ledger;
pub mod notification;
pub mod player_follow;
pub mod player_news;
pub mod sea_orm_active_enums;
pub mod trade;
pub mod trade_history;
pub mod yahoo_trade;
pub mod yahoo_trade_item;
