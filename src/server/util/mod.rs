//! Utility functions shared by services and controllers.
//!
//! Time helpers for token expiry and feed dates, and Yahoo specific helpers for key parsing
//! and building the trade proposal URL.

pub mod time;
pub mod yahoo;
