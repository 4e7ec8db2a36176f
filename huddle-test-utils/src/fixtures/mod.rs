//! Fixtures for database rows and mock HTTP endpoints.
//!
//! - `user` - Huddle users and linked Yahoo accounts
//! - `fantasy` - games, leagues, teams, players, rosters and follows
//! - `trade` - marketplace trades
//! - `yahoo` - Yahoo API, token endpoint and RSS feed mocks

pub mod fantasy;
pub mod trade;
pub mod user;
pub mod yahoo;
