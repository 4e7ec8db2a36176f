//! Declarative test setup.
//!
//! `TestBuilder` queues tables and mock endpoints, all of which are created by `build()`.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for a [`TestContext`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_core_tables: bool,
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_core_tables: false,
            mock_builders: Vec::new(),
        }
    }

    /// Creates every table of the Huddle schema.
    pub fn with_core_tables(mut self) -> Self {
        self.include_core_tables = true;
        self
    }

    /// Creates the table for a single entity. Chain calls to add several.
    ///
    /// ```no_run
    /// use huddle_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), huddle_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(HuddleUser)
    ///     .with_table(Notification)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Registers a custom mock endpoint on the mock server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Creates the configured tables and endpoints.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_core_tables {
            use entity::prelude::*;

            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(HuddleUser),
                schema.create_table_from_entity(HuddleAccount),
                schema.create_table_from_entity(FantasyGame),
                schema.create_table_from_entity(FantasyLeague),
                schema.create_table_from_entity(FantasyTeam),
                schema.create_table_from_entity(FantasyPlayer),
                schema.create_table_from_entity(FantasyTeamPlayer),
                schema.create_table_from_entity(PlayerFollow),
                schema.create_table_from_entity(Trade),
                schema.create_table_from_entity(TradeHistory),
                schema.create_table_from_entity(Ledger),
                schema.create_table_from_entity(YahooTrade),
                schema.create_table_from_entity(YahooTradeItem),
                schema.create_table_from_entity(PlayerNews),
                schema.create_table_from_entity(Notification),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for builder in self.mock_builders {
            let mock = builder(&mut setup.server);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
