//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and the Yahoo API client: token refresh, marketplace
//! trades, mirroring and verifying Yahoo trades, roster sync, news ingestion and
//! notifications.

pub mod news;
pub mod notification;
pub mod proposal;
pub mod sync;
pub mod token;
pub mod trade;
pub mod verification;
