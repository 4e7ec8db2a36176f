//! Verification of trade actions the user carries out on Yahoo's own pages.
//!
//! Huddle cannot write to Yahoo. Instead the client sends the user to Yahoo and polls
//! [`VerificationService::verify`] until Yahoo reports the state the action should have
//! produced. A matching trade is mirrored exactly once, later polls only update its status.

use std::collections::BTreeSet;

use sea_orm::DatabaseConnection;

use crate::{
    model::verification::{TradeAction, VerificationRequestDto, VerificationResultDto},
    server::{
        data::{league::LeagueRepository, team::TeamRepository, yahoo_trade::YahooTradeRepository},
        error::{provider::ProviderError, trade::TradeError, Error},
        model::yahoo::ObservedTrade,
        provider::{oauth::ProviderOAuth, ProviderClient},
        service::{sync::parse::parse_transactions, token::TokenService},
    },
};

const STATUS_ACCEPTED: &str = "accepted";
const STATUS_SUCCESSFUL: &str = "successful";
const STATUS_REJECTED: &str = "rejected";
const STATUS_CANCELLED: &str = "cancelled";

/// Allowed drift between our clock and Yahoo's when checking a proposal's age
const PROPOSAL_CLOCK_SKEW_SECS: i64 = 60;

/// Whether Yahoo's view of a trade confirms the expected action.
///
/// `observed` is the trade Yahoo lists for the action, or `None` when it is no longer listed.
/// A cancelled proposal disappears from the pending list, so absence confirms a cancel.
pub fn reconcile(expected: &TradeAction, observed: Option<&ObservedTrade>) -> bool {
    match expected {
        TradeAction::Propose {
            source_team_key,
            target_team_key,
            player_keys,
            not_before,
        } => observed.is_some_and(|trade| {
            let expected_keys: BTreeSet<&str> = player_keys.iter().map(String::as_str).collect();

            trade.is_pending()
                && trade.is_proposal_from(source_team_key, target_team_key)
                && not_before
                    .is_none_or(|since| trade.proposed_since(since - PROPOSAL_CLOCK_SKEW_SECS))
                && trade.player_keys() == expected_keys
        }),
        TradeAction::Accept { .. } => observed.is_some_and(|trade| {
            trade.status == STATUS_ACCEPTED || trade.status == STATUS_SUCCESSFUL
        }),
        TradeAction::Reject { .. } => observed.is_some_and(|trade| trade.status == STATUS_REJECTED),
        TradeAction::Cancel { .. } => observed.is_none_or(|trade| trade.status == STATUS_CANCELLED),
    }
}

/// The trade among `observed` the action refers to.
///
/// Proposals have no Yahoo key yet and are found by direction, players and age. The other
/// actions are found by key.
pub fn locate<'t>(expected: &TradeAction, observed: &'t [ObservedTrade]) -> Option<&'t ObservedTrade> {
    match expected {
        TradeAction::Propose { .. } => observed
            .iter()
            .find(|trade| reconcile(expected, Some(trade))),
        TradeAction::Accept { yahoo_trade_id }
        | TradeAction::Reject { yahoo_trade_id }
        | TradeAction::Cancel { yahoo_trade_id } => observed
            .iter()
            .find(|trade| &trade.transaction_key == yahoo_trade_id),
    }
}

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    provider: &'a ProviderClient,
    oauth: &'a ProviderOAuth,
}

impl<'a> VerificationService<'a> {
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

    /// Checks Yahoo for the outcome of `request.action` and records it on a match.
    ///
    /// # Returns
    /// - `Ok(VerificationResultDto)` - `matched` is false while Yahoo does not reflect the action yet
    /// - `Err(Error::TradeError(NotInLeague))` - The user manages no team in the league
    /// - `Err(Error::ProviderError(_))` - Yahoo request failed after the token retry
    pub async fn verify(
        &self,
        user_id: i32,
        request: VerificationRequestDto,
    ) -> Result<VerificationResultDto, Error> {
        let league_id = request.league_id;
        let league = LeagueRepository::new(self.db)
            .get_by_id(league_id)
            .await?
            .ok_or_else(|| TradeError::RecordNotFound(format!("League ID {}", league_id)))?;

        let team = TeamRepository::new(self.db)
            .find_managed_in_league(league.id, user_id)
            .await?
            .ok_or(TradeError::NotInLeague { league_id, user_id })?;

        let league_key = league.league_key.as_str();
        let team_key = team.team_key.as_str();
        let (pending, completed) = TokenService::new(self.db, self.oauth)
            .with_token_retry(user_id, |token| async move {
                let pending = self
                    .provider
                    .team_pending_trades(&token, league_key, team_key)
                    .await?;
                let completed = self.provider.league_transactions(&token, league_key).await?;

                Ok::<_, ProviderError>((pending, completed))
            })
            .await?;

        let mut observed = parse_transactions(&pending);
        observed.extend(parse_transactions(&completed));

        let located = locate(&request.action, &observed);
        let matched = reconcile(&request.action, located);

        let yahoo_trade_id = match (&request.action, located) {
            (_, Some(trade)) => Some(trade.transaction_key.clone()),
            (TradeAction::Propose { .. }, None) => None,
            (
                TradeAction::Accept { yahoo_trade_id }
                | TradeAction::Reject { yahoo_trade_id }
                | TradeAction::Cancel { yahoo_trade_id },
                None,
            ) => Some(yahoo_trade_id.clone()),
        };

        if !matched {
            tracing::debug!(user_id, league_id, "Trade action not reflected on Yahoo yet");

            return Ok(VerificationResultDto {
                matched,
                yahoo_trade_id: None,
                observed_status: located.map(|trade| trade.status.clone()),
            });
        }

        let observed_status = match located {
            Some(trade) => trade.status.clone(),
            None => STATUS_CANCELLED.to_string(),
        };

        if let Some(yahoo_trade_id) = &yahoo_trade_id {
            self.record(league.id, yahoo_trade_id, located, &observed_status)
                .await?;
        }

        tracing::info!(user_id, league_id, yahoo_trade_id = ?yahoo_trade_id, status = %observed_status, "Verified Yahoo trade action");

        Ok(VerificationResultDto {
            matched,
            yahoo_trade_id,
            observed_status: Some(observed_status),
        })
    }

    /// Mirrors the trade if it is new, otherwise brings the mirrored status up to date.
    async fn record(
        &self,
        league_id: i32,
        yahoo_trade_id: &str,
        observed: Option<&ObservedTrade>,
        status: &str,
    ) -> Result<(), Error> {
        let repo = YahooTradeRepository::new(self.db);

        match repo.find_by_yahoo_id(yahoo_trade_id).await? {
            Some(mirrored) if mirrored.status == status => {}
            Some(mirrored) => {
                repo.update_status(mirrored, status).await?;
            }
            None => {
                if let Some(trade) = observed {
                    repo.create_with_items(league_id, trade).await?;
                }
            }
        }

        Ok(())
    }
}
