use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{ChampionshipSource, SourceError};
use crate::models::championship::{Championship, ChampionshipSnapshot, Participant};
use crate::models::ranking::{
    HighlanderResponse, LeaderboardResponse, PickView, ScorecardResponse, SelectionView,
    StandingsResponse,
};
use crate::ranking::{aggregate_standings, compute_highlander, score_predictions, RankingError, Standing};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Championship not found: {0}")]
    ChampionshipNotFound(Uuid),

    #[error("User {user_id} does not take part in championship {championship_id}")]
    ParticipantNotFound { championship_id: Uuid, user_id: Uuid },

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Computes standings and the Highlander from a fresh snapshot on every call.
/// Nothing is cached, so results always reflect the latest platform data.
#[derive(Clone)]
pub struct RankingService {
    source: Arc<dyn ChampionshipSource>,
}

impl RankingService {
    pub fn new(source: Arc<dyn ChampionshipSource>) -> Self {
        Self { source }
    }

    async fn load(&self, championship_id: Uuid) -> Result<ChampionshipSnapshot, ServiceError> {
        self.source
            .load_snapshot(championship_id)
            .await?
            .ok_or(ServiceError::ChampionshipNotFound(championship_id))
    }

    #[tracing::instrument(name = "List championships", skip(self))]
    pub async fn list_championships(&self) -> Result<Vec<Championship>, ServiceError> {
        Ok(self.source.list_championships().await?)
    }

    #[tracing::instrument(name = "Compute standings", skip(self), fields(championship_id = %championship_id))]
    pub async fn get_standings(&self, championship_id: Uuid) -> Result<StandingsResponse, ServiceError> {
        let snapshot = self.load(championship_id).await?;
        let standings = standings_for(&snapshot)?;

        tracing::info!("Computed standings for {} participants", standings.len());

        Ok(StandingsResponse {
            finished_matches: snapshot.matches.iter().filter(|m| m.is_finished()).count(),
            total_matches: snapshot.matches.len(),
            computed_at: Utc::now(),
            championship: snapshot.championship,
            standings,
        })
    }

    #[tracing::instrument(name = "Compute highlander", skip(self), fields(championship_id = %championship_id))]
    pub async fn get_highlander(&self, championship_id: Uuid) -> Result<HighlanderResponse, ServiceError> {
        let snapshot = self.load(championship_id).await?;
        Ok(highlander_for(&snapshot))
    }

    #[tracing::instrument(name = "Compute leaderboard", skip(self), fields(championship_id = %championship_id))]
    pub async fn get_leaderboard(&self, championship_id: Uuid) -> Result<LeaderboardResponse, ServiceError> {
        let snapshot = self.load(championship_id).await?;
        let standings = standings_for(&snapshot)?;
        let highlander = highlander_for(&snapshot);

        Ok(LeaderboardResponse {
            championship: snapshot.championship,
            standings,
            highlander,
            computed_at: Utc::now(),
        })
    }

    #[tracing::instrument(
        name = "Compute scorecard",
        skip(self),
        fields(championship_id = %championship_id, user_id = %user_id)
    )]
    pub async fn get_scorecard(&self, championship_id: Uuid, user_id: Uuid) -> Result<ScorecardResponse, ServiceError> {
        let snapshot = self.load(championship_id).await?;
        let scored = score_predictions(
            &snapshot.matches,
            &snapshot.predictions,
            &snapshot.championship.scoring_rule,
        )?;
        let standings = aggregate_standings(&snapshot.participants, &scored);

        let standing = standings
            .into_iter()
            .find(|s| s.user_id == user_id)
            .ok_or(ServiceError::ParticipantNotFound { championship_id, user_id })?;

        let participant = snapshot.participant(user_id).cloned().unwrap_or(Participant {
            user_id,
            display_name: standing.display_name.clone(),
        });

        Ok(ScorecardResponse {
            championship_id,
            participant,
            standing,
            predictions: scored.into_iter().filter(|p| p.user_id == user_id).collect(),
        })
    }
}

fn standings_for(snapshot: &ChampionshipSnapshot) -> Result<Vec<Standing>, ServiceError> {
    let scored = score_predictions(
        &snapshot.matches,
        &snapshot.predictions,
        &snapshot.championship.scoring_rule,
    )
    .map_err(|e| {
        tracing::error!("Failed to score championship {}: {}", snapshot.championship.id, e);
        e
    })?;

    Ok(aggregate_standings(&snapshot.participants, &scored))
}

fn highlander_for(snapshot: &ChampionshipSnapshot) -> HighlanderResponse {
    let championship = &snapshot.championship;
    let outcome = compute_highlander(
        &snapshot.official_ranking,
        &snapshot.team_selections,
        championship.enable_selection_priority,
    );

    let mut selections: Vec<SelectionView> = snapshot
        .team_selections
        .iter()
        .map(|selection| SelectionView {
            user_id: selection.user_id,
            display_name: snapshot
                .participant(selection.user_id)
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| selection.user_id.to_string()),
            is_winner: outcome.is_winner(selection.user_id),
            picks: selection
                .teams
                .iter()
                .enumerate()
                .map(|(slot, team)| PickView {
                    slot,
                    team: team.clone(),
                    highlight: outcome.highlight(team, slot),
                })
                .collect(),
        })
        .collect();
    selections.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    if outcome.applies && !championship.status.official_ranking_visible() {
        tracing::warn!(
            "Championship {} has an official ranking while in status {}",
            championship.id,
            championship.status
        );
    }

    HighlanderResponse {
        championship_id: championship.id,
        enable_selection_priority: championship.enable_selection_priority,
        selections_locked: !championship.status.selections_editable(),
        official_ranking: snapshot.official_ranking.clone(),
        outcome,
        selections,
    }
}
