//! Data access layer repositories.
//!
//! One repository per aggregate, each a thin wrapper over SeaORM queries borrowing the
//! database connection. Repositories return `DbErr` and leave authorization and business
//! rules to the services.

pub mod account;
pub mod audit;
pub mod league;
pub mod news;
pub mod notification;
pub mod player;
pub mod team;
pub mod trade;
pub mod user;
pub mod yahoo_trade;
