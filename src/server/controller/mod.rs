//! HTTP controller endpoints for the Huddle web API.
//!
//! Handlers read the signed-in user from the session, delegate to a service and return JSON.
//! Every handler is documented with utoipa and registered in [`crate::server::router`].

pub mod cron;
pub mod notification;
pub mod sync;
pub mod trade;
pub mod util;
pub mod verification;
