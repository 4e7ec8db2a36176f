//! Mirroring of Yahoo trades and rosters into the local store.

pub mod parse;
pub mod roster;

use sea_orm::DatabaseConnection;

use crate::{
    model::sync::TradeSyncDto,
    server::{
        data::{league::LeagueRepository, team::TeamRepository, yahoo_trade::YahooTradeRepository},
        error::{trade::TradeError, Error},
        provider::{oauth::ProviderOAuth, ProviderClient},
        service::{sync::parse::parse_transactions, token::TokenService},
    },
};

pub struct TradeSyncService<'a> {
    db: &'a DatabaseConnection,
    provider: &'a ProviderClient,
    oauth: &'a ProviderOAuth,
}

impl<'a> TradeSyncService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        provider: &'a ProviderClient,
        oauth: &'a ProviderOAuth,
    ) -> Self {
        Self {
            db,
            provider,
            oauth,
        }
    }

    /// Mirrors the league's completed Yahoo trades.
    ///
    /// Trades whose transaction key is already stored are skipped, so repeated runs insert
    /// nothing new. The user must manage a team in the league.
    pub async fn sync_league(&self, user_id: i32, league_id: i32) -> Result<TradeSyncDto, Error> {
        let league = LeagueRepository::new(self.db)
            .get_by_id(league_id)
            .await?
            .ok_or_else(|| TradeError::RecordNotFound(format!("League ID {}", league_id)))?;

        TeamRepository::new(self.db)
            .find_managed_in_league(league.id, user_id)
            .await?
            .ok_or(TradeError::NotInLeague { league_id, user_id })?;

        let league_key = league.league_key.as_str();
        let payload = TokenService::new(self.db, self.oauth)
            .with_token_retry(user_id, |token| async move {
                self.provider.league_transactions(&token, league_key).await
            })
            .await?;

        let observed = parse_transactions(&payload);

        let repo = YahooTradeRepository::new(self.db);
        let keys: Vec<String> = observed.iter().map(|t| t.transaction_key.clone()).collect();
        let existing = repo.get_existing_yahoo_ids(&keys).await?;

        let mut result = TradeSyncDto {
            fetched: observed.len(),
            ..Default::default()
        };

        for trade in observed {
            if existing.contains(&trade.transaction_key) {
                result.skipped += 1;
                continue;
            }

            match repo.create_with_items(league.id, &trade).await? {
                Some(_) => result.inserted += 1,
                None => result.skipped += 1,
            }
        }

        tracing::info!(
            league_id,
            fetched = result.fetched,
            inserted = result.inserted,
            skipped = result.skipped,
            "Synced Yahoo trades"
        );

        Ok(result)
    }
}
