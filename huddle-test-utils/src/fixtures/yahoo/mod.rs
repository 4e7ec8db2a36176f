//! Yahoo payloads and mock endpoints.
//!
//! `data` builds payloads in the nested envelope shape the Yahoo Fantasy API returns,
//! `mockito` registers them on the test server.

pub mod data;
pub mod mockito;

use crate::TestContext;

pub struct YahooFixtures<'a> {
    setup: &'a mut TestContext,
}

impl TestContext {
    pub fn yahoo(&mut self) -> YahooFixtures<'_> {
        YahooFixtures { setup: self }
    }
}
