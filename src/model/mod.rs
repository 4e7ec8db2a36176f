//! Data transfer objects shared between the HTTP API and its clients.

pub mod api;
pub mod news;
pub mod notification;
pub mod sync;
pub mod trade;
pub mod verification;
