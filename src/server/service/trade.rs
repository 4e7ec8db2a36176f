//! Marketplace trades between Huddle users.
//!
//! A listing is a MARKETPLACE trade without a target. An offer on a listing is a DIRECT trade
//! addressed to the listing's owner with `parent_trade_id` pointing at the listing. Direct
//! trades may also be proposed without a listing. Statuses only move forward, see
//! [`TradeStatus::is_terminal`].

use std::collections::{BTreeSet, HashMap};

use entity::sea_orm_active_enums::{NotificationKind, TradeScope, TradeStatus};
use sea_orm::DatabaseConnection;

use crate::{
    model::trade::{
        CreateTradeDto, ListingDto, TradeAsset, TradeDashboardDto, TradeDto, TradeScopeDto,
        TradeStatusDto,
    },
    server::{
        data::{
            audit::{LedgerRepository, TradeHistoryRepository},
            team::TeamRepository,
            trade::{CreateTradeParams, TradeRepository},
            user::UserRepository,
        },
        error::{trade::TradeError, validation::ValidationError, Error},
        model::db::TradeModel,
        service::notification::NotificationService,
    },
};

/// Ledger reason recorded for both parties of an accepted trade
const LEDGER_REASON_TRADE_ACCEPTED: &str = "TRADE_ACCEPTED";

pub struct TradeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TradeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a listing, a direct trade, or an offer on a listing.
    ///
    /// # Returns
    /// - `Ok(TradeDto)` - The new OPEN trade
    /// - `Err(Error::ValidationError(_))` - One or more request fields are invalid
    /// - `Err(Error::DbErr(_))` - Database operation failed
    pub async fn create(&self, user_id: i32, request: CreateTradeDto) -> Result<TradeDto, Error> {
        let trade_repo = TradeRepository::new(self.db);
        let mut validation = ValidationError::new();

        if request.offered_assets.is_empty() {
            validation.add("offeredAssets", "Offer at least one player");
        } else if !self.owns_assets(user_id, &request.offered_assets).await? {
            validation.add("offeredAssets", "You can only offer players on your own teams");
        }

        let scope = match request.scope {
            TradeScopeDto::Marketplace => TradeScope::Marketplace,
            TradeScopeDto::Direct => TradeScope::Direct,
        };

        match (scope, request.target_user_id) {
            (TradeScope::Marketplace, Some(_)) => {
                validation.add("targetUserId", "Marketplace listings cannot have a target");
            }
            (TradeScope::Marketplace, None) => {}
            (TradeScope::Direct, None) => {
                validation.add("targetUserId", "Choose who to send this trade to");
            }
            (TradeScope::Direct, Some(target_id)) if target_id == user_id => {
                validation.add("targetUserId", "You cannot trade with yourself");
            }
            (TradeScope::Direct, Some(target_id)) => {
                if UserRepository::new(self.db).get_by_id(target_id).await?.is_none() {
                    validation.add("targetUserId", "User not found");
                }
            }
        }

        let listing = match request.parent_trade_id {
            Some(_) if scope == TradeScope::Marketplace => {
                validation.add("parentTradeId", "Listings cannot be made against other listings");
                None
            }
            Some(parent_id) => {
                let listing = trade_repo.get_by_id(parent_id).await?.filter(|listing| {
                    listing.scope == TradeScope::Marketplace
                        && !listing.status.is_terminal()
                        && Some(listing.initiator_id) == request.target_user_id
                });
                if listing.is_none() {
                    validation.add("parentTradeId", "This listing is no longer open");
                }
                listing
            }
            None => None,
        };

        validation.into_result()?;

        let trade = trade_repo
            .create(CreateTradeParams {
                initiator_id: user_id,
                target_user_id: request.target_user_id,
                parent_trade_id: request.parent_trade_id,
                scope,
                offered_assets: assets_to_json(&request.offered_assets)?,
                requested_assets: assets_to_json(&request.requested_assets)?,
                message: request.message,
            })
            .await?;

        if let Some(listing) = listing {
            if listing.status == TradeStatus::Open {
                trade_repo
                    .update_status(listing, TradeStatus::Negotiating)
                    .await?;
            }
        }

        if let Some(target_id) = trade.target_user_id {
            NotificationService::new(self.db)
                .notify(
                    target_id,
                    NotificationKind::Trade,
                    "New trade offer",
                    "You received a new trade offer",
                    Some(trade_link(trade.id)),
                )
                .await;
        }

        tracing::info!(trade_id = trade.id, user_id, scope = ?trade.scope, "Created trade");

        trade_dto(trade)
    }

    /// Accepts a trade addressed to the user.
    ///
    /// Accepting an offer also accepts its listing and rejects the listing's other offers.
    pub async fn accept(&self, user_id: i32, trade_id: i32) -> Result<TradeDto, Error> {
        let repo = TradeRepository::new(self.db);
        let trade = self.get_actionable(trade_id, user_id, "accept").await?;
        if trade.target_user_id != Some(user_id) {
            return Err(forbidden(trade_id, user_id, "accept"));
        }

        let trade = repo.update_status(trade, TradeStatus::Accepted).await?;

        if let Some(listing_id) = trade.parent_trade_id {
            if let Some(listing) = repo.get_by_id(listing_id).await? {
                if !listing.status.is_terminal() {
                    repo.update_status(listing, TradeStatus::Accepted).await?;
                }
            }

            let siblings = repo.get_active_offers_for(&[listing_id]).await?;
            self.reject_all(siblings, "The listing was traded to someone else")
                .await?;
        }

        self.record_acceptance(&trade).await;

        NotificationService::new(self.db)
            .notify(
                trade.initiator_id,
                NotificationKind::Trade,
                "Trade accepted",
                "Your trade was accepted",
                Some(trade_link(trade.id)),
            )
            .await;

        tracing::info!(trade_id, user_id, "Accepted trade");

        trade_dto(trade)
    }

    /// Rejects a trade addressed to the user.
    pub async fn reject(&self, user_id: i32, trade_id: i32) -> Result<TradeDto, Error> {
        let trade = self.get_actionable(trade_id, user_id, "reject").await?;
        if trade.target_user_id != Some(user_id) {
            return Err(forbidden(trade_id, user_id, "reject"));
        }

        let trade = TradeRepository::new(self.db)
            .update_status(trade, TradeStatus::Rejected)
            .await?;

        NotificationService::new(self.db)
            .notify(
                trade.initiator_id,
                NotificationKind::Trade,
                "Trade rejected",
                "Your trade was rejected",
                Some(trade_link(trade.id)),
            )
            .await;

        tracing::info!(trade_id, user_id, "Rejected trade");

        trade_dto(trade)
    }

    /// Withdraws a trade the user initiated. Offers on a cancelled listing are rejected.
    pub async fn cancel(&self, user_id: i32, trade_id: i32) -> Result<TradeDto, Error> {
        let repo = TradeRepository::new(self.db);
        let trade = self.get_actionable(trade_id, user_id, "cancel").await?;
        if trade.initiator_id != user_id {
            return Err(forbidden(trade_id, user_id, "cancel"));
        }

        let trade = repo.update_status(trade, TradeStatus::Cancelled).await?;

        if trade.scope == TradeScope::Marketplace {
            let offers = repo.get_active_offers_for(&[trade.id]).await?;
            self.reject_all(offers, "The listing was withdrawn").await?;
        }

        tracing::info!(trade_id, user_id, "Cancelled trade");

        trade_dto(trade)
    }

    /// The user's open listings with their offers, and the trades they sent and received.
    pub async fn dashboard(&self, user_id: i32) -> Result<TradeDashboardDto, Error> {
        let repo = TradeRepository::new(self.db);

        let listings = repo.get_active_listings_by(user_id).await?;
        let listing_ids: Vec<i32> = listings.iter().map(|listing| listing.id).collect();

        let mut offers_by_listing: HashMap<i32, Vec<TradeDto>> = HashMap::new();
        for offer in repo.get_active_offers_for(&listing_ids).await? {
            if let Some(listing_id) = offer.parent_trade_id {
                offers_by_listing
                    .entry(listing_id)
                    .or_default()
                    .push(trade_dto(offer)?);
            }
        }

        let listings = listings
            .into_iter()
            .map(|listing| {
                let offers = offers_by_listing.remove(&listing.id).unwrap_or_default();

                Ok(ListingDto {
                    listing: trade_dto(listing)?,
                    offers,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let offers_received = repo
            .get_active_received_by(user_id)
            .await?
            .into_iter()
            .map(trade_dto)
            .collect::<Result<Vec<_>, Error>>()?;
        let offers_sent = repo
            .get_active_sent_by(user_id)
            .await?
            .into_iter()
            .map(trade_dto)
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(TradeDashboardDto {
            listings,
            offers_received,
            offers_sent,
        })
    }

    /// Loads a trade that can still change status.
    async fn get_actionable(
        &self,
        trade_id: i32,
        user_id: i32,
        action: &'static str,
    ) -> Result<TradeModel, Error> {
        let trade = TradeRepository::new(self.db)
            .get_by_id(trade_id)
            .await?
            .ok_or(TradeError::NotFound(trade_id))?;

        if trade.initiator_id != user_id && trade.target_user_id != Some(user_id) {
            return Err(forbidden(trade_id, user_id, action));
        }
        if trade.status.is_terminal() {
            return Err(TradeError::InvalidState {
                trade_id,
                status: trade.status,
            }
            .into());
        }

        Ok(trade)
    }

    /// Whether every offered player is on the roster of a team the user manages.
    async fn owns_assets(&self, user_id: i32, assets: &[TradeAsset]) -> Result<bool, Error> {
        let team_repo = TeamRepository::new(self.db);
        let managed: BTreeSet<i32> = team_repo
            .get_ids_managed_by(user_id)
            .await?
            .into_iter()
            .collect();

        let mut rosters: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for asset in assets {
            let TradeAsset::Player {
                player_id,
                from_team_id,
            } = asset;

            if !managed.contains(from_team_id) {
                return Ok(false);
            }
            if !rosters.contains_key(from_team_id) {
                let roster = team_repo.get_roster_player_ids(*from_team_id).await?;
                rosters.insert(*from_team_id, roster.into_iter().collect());
            }
            if !rosters
                .get(from_team_id)
                .is_some_and(|roster| roster.contains(player_id))
            {
                return Ok(false);
            }
        }

        Ok(true)
    }

    async fn reject_all(&self, trades: Vec<TradeModel>, reason: &str) -> Result<(), Error> {
        let repo = TradeRepository::new(self.db);
        let notifications = NotificationService::new(self.db);

        for trade in trades {
            if trade.status.is_terminal() {
                continue;
            }

            let trade = repo.update_status(trade, TradeStatus::Rejected).await?;
            notifications
                .notify(
                    trade.initiator_id,
                    NotificationKind::Trade,
                    "Trade rejected",
                    reason,
                    Some(trade_link(trade.id)),
                )
                .await;
        }

        Ok(())
    }

    /// Ledger entries for both parties and a snapshot of the accepted trade.
    ///
    /// Audit writes never fail the acceptance, errors are logged.
    async fn record_acceptance(&self, trade: &TradeModel) {
        let ledger = LedgerRepository::new(self.db);
        let parties = std::iter::once(trade.initiator_id).chain(trade.target_user_id);

        for user_id in parties {
            if let Err(e) = ledger
                .create(user_id, 0, LEDGER_REASON_TRADE_ACCEPTED, Some(trade.id))
                .await
            {
                tracing::warn!(trade_id = trade.id, user_id, "Failed to write ledger entry: {}", e);
            }
        }

        let snapshot = match trade_dto(trade.clone()).and_then(|dto| {
            serde_json::to_value(dto).map_err(|e| Error::ParseError(e.to_string()))
        }) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(trade_id = trade.id, "Failed to snapshot trade: {}", e);
                return;
            }
        };

        if let Err(e) = TradeHistoryRepository::new(self.db)
            .create(trade.id, snapshot)
            .await
        {
            tracing::warn!(trade_id = trade.id, "Failed to write trade history: {}", e);
        }
    }
}

fn forbidden(trade_id: i32, user_id: i32, action: &'static str) -> Error {
    TradeError::Forbidden {
        trade_id,
        user_id,
        action,
    }
    .into()
}

fn trade_link(trade_id: i32) -> String {
    format!("/trades/{}", trade_id)
}

fn assets_to_json(assets: &[TradeAsset]) -> Result<serde_json::Value, Error> {
    serde_json::to_value(assets).map_err(|e| Error::ParseError(e.to_string()))
}

fn assets_from_json(trade_id: i32, value: serde_json::Value) -> Result<Vec<TradeAsset>, Error> {
    serde_json::from_value(value).map_err(|e| {
        Error::InternalError(format!("Trade ID {} has malformed assets: {}", trade_id, e))
    })
}

/// Converts a trade row, validating its stored assets.
pub fn trade_dto(trade: TradeModel) -> Result<TradeDto, Error> {
    let scope = match trade.scope {
        TradeScope::Marketplace => TradeScopeDto::Marketplace,
        TradeScope::Direct => TradeScopeDto::Direct,
    };
    let status = match trade.status {
        TradeStatus::Open => TradeStatusDto::Open,
        TradeStatus::Negotiating => TradeStatusDto::Negotiating,
        TradeStatus::Accepted => TradeStatusDto::Accepted,
        TradeStatus::Rejected => TradeStatusDto::Rejected,
        TradeStatus::Cancelled => TradeStatusDto::Cancelled,
    };

    Ok(TradeDto {
        id: trade.id,
        initiator_id: trade.initiator_id,
        target_user_id: trade.target_user_id,
        parent_trade_id: trade.parent_trade_id,
        scope,
        status,
        offered_assets: assets_from_json(trade.id, trade.offered_assets)?,
        requested_assets: assets_from_json(trade.id, trade.requested_assets)?,
        message: trade.message,
        created_at: trade.created_at,
        updated_at: trade.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::{TradeScope, TradeStatus};
    use huddle_test_utils::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    use crate::{
        model::trade::{CreateTradeDto, TradeAsset, TradeScopeDto, TradeStatusDto},
        server::{
            data::trade::TradeRepository,
            error::{trade::TradeError, Error},
            service::{notification::NotificationService, trade::TradeService},
        },
    };

    /// Two users, each managing a team with one rostered player
    struct Setup {
        test: TestContext,
        alice: i32,
        bob: i32,
        /// (player_id, team_id) on alice's team
        alice_player: (i32, i32),
        /// (player_id, team_id) on bob's team
        bob_player: (i32, i32),
    }

    async fn setup() -> Result<Setup, TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let alice = test.user().insert_user("alice").await?;
        let bob = test.user().insert_user("bob").await?;
        let league = test.fantasy().insert_nba_league("466.l.1").await?;
        let alice_team = test
            .fantasy()
            .insert_team(league.id, Some(alice.id), "466.l.1.t.1")
            .await?;
        let bob_team = test
            .fantasy()
            .insert_team(league.id, Some(bob.id), "466.l.1.t.2")
            .await?;
        let alice_player = test
            .fantasy()
            .insert_rostered_player(alice_team.id, "466.p.1", "Luka Doncic")
            .await?;
        let bob_player = test
            .fantasy()
            .insert_rostered_player(bob_team.id, "466.p.2", "Kyrie Irving")
            .await?;

        Ok(Setup {
            test,
            alice: alice.id,
            bob: bob.id,
            alice_player: (alice_player.id, alice_team.id),
            bob_player: (bob_player.id, bob_team.id),
        })
    }

    fn player((player_id, from_team_id): (i32, i32)) -> TradeAsset {
        TradeAsset::Player {
            player_id,
            from_team_id,
        }
    }

    fn request(scope: TradeScopeDto, target: Option<i32>, offered: Vec<TradeAsset>) -> CreateTradeDto {
        CreateTradeDto {
            scope,
            target_user_id: target,
            parent_trade_id: None,
            offered_assets: offered,
            requested_assets: Vec::new(),
            message: None,
        }
    }

    /// Expect field-scoped errors for an empty offer and a missing target
    #[tokio::test]
    async fn create_reports_invalid_fields() -> Result<(), TestError> {
        let setup = setup().await?;

        let result = TradeService::new(&setup.test.db)
            .create(setup.alice, request(TradeScopeDto::Direct, None, Vec::new()))
            .await;

        let Err(Error::ValidationError(validation)) = result else {
            panic!("expected validation error");
        };
        assert!(validation.has_field("offeredAssets"));
        assert!(validation.has_field("targetUserId"));

        Ok(())
    }

    /// Expect offering another user's player to be refused
    #[tokio::test]
    async fn create_requires_owned_players() -> Result<(), TestError> {
        let setup = setup().await?;

        let result = TradeService::new(&setup.test.db)
            .create(
                setup.alice,
                request(TradeScopeDto::Marketplace, None, vec![player(setup.bob_player)]),
            )
            .await;

        let Err(Error::ValidationError(validation)) = result else {
            panic!("expected validation error");
        };
        assert!(validation.has_field("offeredAssets"));

        Ok(())
    }

    /// Expect an offer to move its listing to NEGOTIATING and notify the listing owner
    #[tokio::test]
    async fn offer_moves_listing_to_negotiating() -> Result<(), TestError> {
        let setup = setup().await?;
        let listing = setup
            .test
            .trade()
            .insert_listing(setup.alice, setup.alice_player)
            .await?;
        let service = TradeService::new(&setup.test.db);

        let offer = service
            .create(
                setup.bob,
                CreateTradeDto {
                    parent_trade_id: Some(listing.id),
                    ..request(
                        TradeScopeDto::Direct,
                        Some(setup.alice),
                        vec![player(setup.bob_player)],
                    )
                },
            )
            .await
            .unwrap();

        assert_eq!(offer.status, TradeStatusDto::Open);
        let listing = TradeRepository::new(&setup.test.db)
            .get_by_id(listing.id)
            .await?
            .unwrap();
        assert_eq!(listing.status, TradeStatus::Negotiating);
        assert_eq!(
            NotificationService::new(&setup.test.db)
                .unread_count(setup.alice)
                .await
                .unwrap(),
            1
        );

        Ok(())
    }

    /// Expect accepting an offer to close its listing and reject competing offers
    #[tokio::test]
    async fn accepting_offer_resolves_listing() -> Result<(), TestError> {
        let setup = setup().await?;
        let carol = setup.test.user().insert_user("carol").await?;
        let listing = setup
            .test
            .trade()
            .insert_listing(setup.alice, setup.alice_player)
            .await?;
        let offer = setup
            .test
            .trade()
            .insert_trade(
                setup.bob,
                Some(setup.alice),
                Some(listing.id),
                TradeScope::Direct,
                TradeStatus::Open,
                setup.bob_player,
            )
            .await?;
        let competing = setup
            .test
            .trade()
            .insert_trade(
                carol.id,
                Some(setup.alice),
                Some(listing.id),
                TradeScope::Direct,
                TradeStatus::Open,
                setup.bob_player,
            )
            .await?;

        let accepted = TradeService::new(&setup.test.db)
            .accept(setup.alice, offer.id)
            .await
            .unwrap();

        assert_eq!(accepted.status, TradeStatusDto::Accepted);
        let repo = TradeRepository::new(&setup.test.db);
        assert_eq!(
            repo.get_by_id(listing.id).await?.unwrap().status,
            TradeStatus::Accepted
        );
        assert_eq!(
            repo.get_by_id(competing.id).await?.unwrap().status,
            TradeStatus::Rejected
        );
        assert_eq!(entity::prelude::Ledger::find().count(&setup.test.db).await?, 2);
        assert_eq!(
            entity::prelude::TradeHistory::find()
                .count(&setup.test.db)
                .await?,
            1
        );

        Ok(())
    }

    /// Expect only the target to accept or reject and only the initiator to cancel
    #[tokio::test]
    async fn actions_are_restricted_to_parties() -> Result<(), TestError> {
        let setup = setup().await?;
        let trade = setup
            .test
            .trade()
            .insert_direct(setup.alice, setup.bob, setup.alice_player)
            .await?;
        let service = TradeService::new(&setup.test.db);

        assert!(matches!(
            service.accept(setup.alice, trade.id).await,
            Err(Error::TradeError(TradeError::Forbidden { .. }))
        ));
        assert!(matches!(
            service.cancel(setup.bob, trade.id).await,
            Err(Error::TradeError(TradeError::Forbidden { .. }))
        ));

        let cancelled = service.cancel(setup.alice, trade.id).await.unwrap();
        assert_eq!(cancelled.status, TradeStatusDto::Cancelled);

        Ok(())
    }

    /// Expect every action on a terminal trade to fail without changing it
    #[tokio::test]
    async fn terminal_status_is_final() -> Result<(), TestError> {
        let setup = setup().await?;
        let service = TradeService::new(&setup.test.db);

        for status in [TradeStatus::Accepted, TradeStatus::Rejected, TradeStatus::Cancelled] {
            let trade = setup
                .test
                .trade()
                .insert_trade(
                    setup.alice,
                    Some(setup.bob),
                    None,
                    TradeScope::Direct,
                    status,
                    setup.alice_player,
                )
                .await?;

            assert!(matches!(
                service.accept(setup.bob, trade.id).await,
                Err(Error::TradeError(TradeError::InvalidState { .. }))
            ));
            assert!(matches!(
                service.reject(setup.bob, trade.id).await,
                Err(Error::TradeError(TradeError::InvalidState { .. }))
            ));
            assert!(matches!(
                service.cancel(setup.alice, trade.id).await,
                Err(Error::TradeError(TradeError::InvalidState { .. }))
            ));

            let unchanged = TradeRepository::new(&setup.test.db)
                .get_by_id(trade.id)
                .await?
                .unwrap();
            assert_eq!(unchanged.status, status);
        }

        Ok(())
    }

    /// Expect the dashboard to group offers under their listing
    #[tokio::test]
    async fn dashboard_groups_offers() -> Result<(), TestError> {
        let setup = setup().await?;
        let listing = setup
            .test
            .trade()
            .insert_listing(setup.alice, setup.alice_player)
            .await?;
        setup
            .test
            .trade()
            .insert_trade(
                setup.bob,
                Some(setup.alice),
                Some(listing.id),
                TradeScope::Direct,
                TradeStatus::Open,
                setup.bob_player,
            )
            .await?;
        let service = TradeService::new(&setup.test.db);

        let alice = service.dashboard(setup.alice).await.unwrap();
        let bob = service.dashboard(setup.bob).await.unwrap();

        assert_eq!(alice.listings.len(), 1);
        assert_eq!(alice.listings[0].offers.len(), 1);
        assert_eq!(alice.offers_received.len(), 1);
        assert_eq!(bob.offers_sent.len(), 1);
        assert!(bob.listings.is_empty());

        Ok(())
    }
}
