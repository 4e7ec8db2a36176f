//! Client-side trade workflows, independent of any UI framework or browser runtime.
//!
//! State is published through [`store::Store`]s that the embedding UI subscribes to. The
//! browser specifics (opening a secondary window, calling the HTTP API) are reached through
//! traits so the workflows run the same under a web runtime and in tests.

pub mod error;
pub mod notification;
pub mod store;
pub mod toast;
pub mod verification;
