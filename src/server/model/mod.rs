//! Server application models.
//!
//! Application state shared by handlers, database model aliases, session data and the typed
//! view of Yahoo trades observed through the API.

pub mod app;
pub mod db;
pub mod session;
pub mod yahoo;
