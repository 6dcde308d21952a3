use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{ChampionshipSource, SourceError};
use crate::models::championship::{
    Championship, ChampionshipSnapshot, Match, Participant, Prediction, TeamSelection,
};
use crate::scoring::ScoringRule;

#[derive(Debug, FromRow)]
struct ChampionshipRow {
    id: Uuid,
    name: String,
    exact_score_points: Option<i32>,
    winner_points: Option<i32>,
    enable_selection_priority: bool,
    status: String,
}

#[derive(Debug, FromRow)]
struct ParticipantRow {
    user_id: Uuid,
    display_name: String,
}

#[derive(Debug, FromRow)]
struct MatchRow {
    id: Uuid,
    championship_id: Uuid,
    home_team: String,
    away_team: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
    status: String,
    kickoff_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct PredictionRow {
    user_id: Uuid,
    match_id: Uuid,
    home_score: i32,
    away_score: i32,
}

#[derive(Debug, FromRow)]
struct SelectionRow {
    user_id: Uuid,
    team_name: String,
}

#[derive(Debug, FromRow)]
struct RankingRow {
    position: i32,
    team_name: String,
}

/// Highest official ranking position accepted from the database
const MAX_RANKING_POSITION: i32 = 1024;

const CHAMPIONSHIP_COLUMNS: &str = r#"
    SELECT id, name, exact_score_points, winner_points,
           enable_selection_priority, status
    FROM championships
"#;

/// Postgres-backed read interface over the platform tables
#[derive(Debug, Clone)]
pub struct PgChampionshipSource {
    pool: PgPool,
    /// Used for championships whose rule columns are NULL
    default_rule: ScoringRule,
}

impl PgChampionshipSource {
    pub fn new(pool: PgPool, default_rule: ScoringRule) -> Self {
        Self { pool, default_rule }
    }

    fn to_championship(&self, row: ChampionshipRow) -> Result<Championship, SourceError> {
        let scoring_rule = match (row.exact_score_points, row.winner_points) {
            (Some(exact), Some(winner)) => ScoringRule::from_columns(exact, winner)
                .map_err(|e| SourceError::Inconsistent(format!("championship {}: {}", row.id, e)))?,
            _ => self.default_rule,
        };

        Ok(Championship {
            id: row.id,
            name: row.name,
            scoring_rule,
            enable_selection_priority: row.enable_selection_priority,
            status: row.status.into(),
        })
    }

    async fn load_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        championship_id: Uuid,
    ) -> Result<Option<ChampionshipSnapshot>, SourceError> {
        let row = sqlx::query_as::<_, ChampionshipRow>(&format!("{} WHERE id = $1", CHAMPIONSHIP_COLUMNS))
            .bind(championship_id)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let championship = self.to_championship(row)?;

        let participants = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT user_id, display_name
            FROM championship_participants
            WHERE championship_id = $1
            ORDER BY display_name
            "#,
        )
        .bind(championship_id)
        .fetch_all(&mut **tx)
        .await?
        .into_iter()
        .map(|row| Participant {
            user_id: row.user_id,
            display_name: row.display_name,
        })
        .collect();

        let matches: Vec<Match> = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, championship_id, home_team, away_team,
                   home_score, away_score, status, kickoff_at
            FROM matches
            WHERE championship_id = $1
            ORDER BY kickoff_at, id
            "#,
        )
        .bind(championship_id)
        .fetch_all(&mut **tx)
        .await?
        .into_iter()
        .map(|row| Match {
            id: row.id,
            championship_id: row.championship_id,
            home_team: row.home_team,
            away_team: row.away_team,
            home_score: row.home_score,
            away_score: row.away_score,
            status: row.status.into(),
            kickoff_at: row.kickoff_at,
        })
        .collect();

        let predictions: Vec<Prediction> = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT p.user_id, p.match_id, p.home_score, p.away_score
            FROM predictions p
            JOIN matches m ON m.id = p.match_id
            WHERE m.championship_id = $1
            "#,
        )
        .bind(championship_id)
        .fetch_all(&mut **tx)
        .await?
        .into_iter()
        .map(|row| Prediction {
            user_id: row.user_id,
            match_id: row.match_id,
            home_score: row.home_score,
            away_score: row.away_score,
        })
        .collect();

        let selection_rows = sqlx::query_as::<_, SelectionRow>(
            r#"
            SELECT user_id, team_name
            FROM team_selections
            WHERE championship_id = $1
            ORDER BY user_id, priority
            "#,
        )
        .bind(championship_id)
        .fetch_all(&mut **tx)
        .await?;

        let mut team_selections: Vec<TeamSelection> = Vec::new();
        for row in selection_rows {
            match team_selections.last_mut() {
                Some(selection) if selection.user_id == row.user_id => selection.teams.push(row.team_name),
                _ => team_selections.push(TeamSelection {
                    user_id: row.user_id,
                    teams: vec![row.team_name],
                }),
            }
        }

        let ranking_rows = sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT position, team_name
            FROM official_rankings
            WHERE championship_id = $1
            ORDER BY position
            "#,
        )
        .bind(championship_id)
        .fetch_all(&mut **tx)
        .await?;

        let official_ranking = ranking_slots(championship_id, ranking_rows)?;

        debug!(
            "Loaded championship {}: {} matches, {} predictions, {} selections",
            championship_id,
            matches.len(),
            predictions.len(),
            team_selections.len()
        );

        Ok(Some(ChampionshipSnapshot {
            championship,
            participants,
            matches,
            predictions,
            team_selections,
            official_ranking,
        }))
    }
}

/// Lay ranking rows out by position. Positions are 1-based and gaps stay as
/// empty slots.
fn ranking_slots(championship_id: Uuid, rows: Vec<RankingRow>) -> Result<Vec<String>, SourceError> {
    let mut official_ranking: Vec<String> = Vec::new();
    for row in rows {
        if !(1..=MAX_RANKING_POSITION).contains(&row.position) {
            return Err(SourceError::Inconsistent(format!(
                "championship {}: invalid ranking position {}",
                championship_id, row.position
            )));
        }
        let slot = (row.position - 1) as usize;
        if official_ranking.len() <= slot {
            official_ranking.resize(slot + 1, String::new());
        }
        official_ranking[slot] = row.team_name;
    }
    Ok(official_ranking)
}

#[async_trait]
impl ChampionshipSource for PgChampionshipSource {
    async fn list_championships(&self) -> Result<Vec<Championship>, SourceError> {
        let rows = sqlx::query_as::<_, ChampionshipRow>(&format!("{} ORDER BY name", CHAMPIONSHIP_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|row| self.to_championship(row)).collect()
    }

    async fn load_snapshot(&self, championship_id: Uuid) -> Result<Option<ChampionshipSnapshot>, SourceError> {
        info!("Loading snapshot for championship {}", championship_id);

        // All reads see the same database state
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let snapshot = self.load_in_tx(&mut tx, championship_id).await?;
        tx.commit().await?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(position: i32, team_name: &str) -> RankingRow {
        RankingRow {
            position,
            team_name: team_name.to_string(),
        }
    }

    #[test]
    fn test_ranking_gaps_become_empty_slots() {
        let slots = ranking_slots(Uuid::nil(), vec![row(1, "Spain"), row(3, "Italy")]).unwrap();
        assert_eq!(slots, vec!["Spain".to_string(), String::new(), "Italy".to_string()]);
    }

    #[test]
    fn test_out_of_range_positions_are_rejected() {
        for position in [0, -3, MAX_RANKING_POSITION + 1, i32::MAX] {
            let err = ranking_slots(Uuid::nil(), vec![row(1, "Spain"), row(position, "Italy")]).unwrap_err();
            assert!(matches!(err, SourceError::Inconsistent(msg) if msg.contains(&position.to_string())));
        }
    }
}
