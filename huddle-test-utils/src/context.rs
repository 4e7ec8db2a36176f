//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! Holds an in-memory SQLite database, a mock HTTP server standing in for the Yahoo API, the
//! Yahoo token endpoint and RSS feeds, and an in-memory session.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::{
    constant::{TEST_API_PATH, TEST_TOKEN_PATH},
    error::TestError,
};

/// Test environment for a single test.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_core_tables().build().await?;
///
/// let user = test.user().insert_user("alice").await?;
/// test.yahoo().create_token_endpoint(1);
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,

    /// Mock HTTP server, exposed so tests can register one-off endpoints
    pub server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock server
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Base URL of the mock Yahoo Fantasy API
    pub fn api_url(&self) -> String {
        format!("{}{}", self.server.url(), TEST_API_PATH)
    }

    /// URL of the mock Yahoo token endpoint
    pub fn token_url(&self) -> String {
        format!("{}{}", self.server.url(), TEST_TOKEN_PATH)
    }

    /// Keeps a mock alive for the rest of the test and includes it in [`Self::assert_mocks`].
    pub fn keep_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Asserts every mock kept by the context was hit the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
