//! Session data.
//!
//! Sessions are established by the login flow and stored in Valkey; the server only reads
//! the user id from them.

pub mod user;
