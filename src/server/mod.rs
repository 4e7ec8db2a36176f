//! Server application core modules.
//!
//! Everything server side: HTTP routing, the Yahoo Fantasy API client and token refresh,
//! database repositories, trade/sync/verification/news/notification services and the cron
//! scheduler that drives news ingestion.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod provider;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
