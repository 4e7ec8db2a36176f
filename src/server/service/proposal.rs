use std::collections::HashMap;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::verification::{
        ProposalUrlDto, ProposalUrlRequestDto, TradeAction, VerificationRequestDto,
    },
    server::{
        data::{league::LeagueRepository, player::PlayerRepository, team::TeamRepository},
        error::{trade::TradeError, validation::ValidationError, Error},
        util::yahoo::propose_trade_url,
    },
};

pub struct ProposalService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProposalService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the Yahoo "propose trade" URL for a trade between two local teams.
    ///
    /// Also returns the verification request the client polls with once the user has
    /// submitted the proposal on Yahoo.
    pub async fn proposal_url(
        &self,
        user_id: i32,
        request: ProposalUrlRequestDto,
    ) -> Result<ProposalUrlDto, Error> {
        let mut validation = ValidationError::new();
        if request.offered_player_ids.is_empty() && request.requested_player_ids.is_empty() {
            validation.add("offeredPlayerIds", "Select at least one player");
        }
        if request.source_team_id == request.target_team_id {
            validation.add("targetTeamId", "Choose a team other than your own");
        }
        validation.into_result()?;

        let teams = TeamRepository::new(self.db)
            .get_many(&[request.source_team_id, request.target_team_id])
            .await?;
        let find_team = |team_id: i32| {
            teams
                .iter()
                .find(|team| team.id == team_id)
                .ok_or_else(|| TradeError::RecordNotFound(format!("Team ID {}", team_id)))
        };
        let source = find_team(request.source_team_id)?;
        let target = find_team(request.target_team_id)?;

        if source.manager_id != Some(user_id) {
            return Err(TradeError::NotTeamManager {
                team_id: source.id,
                user_id,
            }
            .into());
        }
        if source.league_id != target.league_id {
            let mut validation = ValidationError::new();
            validation.add("targetTeamId", "Team is not in the same league");

            return Err(validation.into());
        }

        let (league, game) = LeagueRepository::new(self.db)
            .get_with_game(source.league_id)
            .await?
            .ok_or_else(|| TradeError::RecordNotFound(format!("League ID {}", source.league_id)))?;
        let game = game.ok_or_else(|| {
            Error::InternalError(format!("League ID {} has no game", league.id))
        })?;

        let all_ids: Vec<i32> = request
            .offered_player_ids
            .iter()
            .chain(&request.requested_player_ids)
            .copied()
            .collect();
        let player_keys: HashMap<i32, String> = PlayerRepository::new(self.db)
            .get_many(&all_ids)
            .await?
            .into_iter()
            .map(|player| (player.id, player.player_key))
            .collect();
        let resolve = |ids: &[i32]| -> Result<Vec<String>, TradeError> {
            ids.iter()
                .map(|id| {
                    player_keys
                        .get(id)
                        .cloned()
                        .ok_or_else(|| TradeError::RecordNotFound(format!("Player ID {}", id)))
                })
                .collect()
        };
        let offered = resolve(&request.offered_player_ids)?;
        let requested = resolve(&request.requested_player_ids)?;

        let url = propose_trade_url(
            &game.code,
            &league.league_key,
            &source.team_key,
            &target.team_key,
            &offered,
            &requested,
        );

        Ok(ProposalUrlDto {
            url,
            verification: VerificationRequestDto {
                league_id: league.id,
                action: TradeAction::Propose {
                    source_team_key: source.team_key.clone(),
                    target_team_key: target.team_key.clone(),
                    player_keys: offered.into_iter().chain(requested).collect(),
                    not_before: Some(Utc::now().timestamp()),
                },
            },
        })
    }
}
