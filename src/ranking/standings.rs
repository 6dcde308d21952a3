use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::championship::{Match, Participant, Prediction};
use crate::scoring::{classify_prediction, PredictionKind, ScoreError, ScoringRule};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RankingError {
    /// Incomplete data: the match is finished but its score was never recorded
    #[error("Incomplete data: match {match_id} is finished but has no result")]
    MissingResult { match_id: Uuid },

    /// Incomplete data: the prediction points at a match outside the snapshot
    #[error("Incomplete data: prediction of user {user_id} references unknown match {match_id}")]
    UnknownMatch { user_id: Uuid, match_id: Uuid },

    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl RankingError {
    pub fn is_incomplete_data(&self) -> bool {
        matches!(
            self,
            RankingError::MissingResult { .. } | RankingError::UnknownMatch { .. }
        )
    }
}

/// One prediction on a finished match, with the points it earned
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoredPrediction {
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub predicted_home: i32,
    pub predicted_away: i32,
    pub actual_home: i32,
    pub actual_away: i32,
    pub kind: PredictionKind,
    pub points: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Standing {
    pub user_id: Uuid,
    pub display_name: String,
    /// 1-based; users tied on points and hit counts share a position
    pub position: u32,
    /// Wider than per-prediction points so large rules cannot overflow it
    pub total_points: u64,
    pub exact_hits: u32,
    pub outcome_hits: u32,
    pub predictions_scored: u32,
}

impl Standing {
    fn empty(user_id: Uuid, display_name: String) -> Self {
        Self {
            user_id,
            display_name,
            position: 0,
            total_points: 0,
            exact_hits: 0,
            outcome_hits: 0,
            predictions_scored: 0,
        }
    }

    fn add(&mut self, scored: &ScoredPrediction) {
        self.total_points += u64::from(scored.points);
        self.predictions_scored += 1;
        match scored.kind {
            PredictionKind::Exact => self.exact_hits += 1,
            PredictionKind::Outcome => self.outcome_hits += 1,
            PredictionKind::Miss => {}
        }
    }

    fn same_score(&self, other: &Standing) -> bool {
        self.total_points == other.total_points
            && self.exact_hits == other.exact_hits
            && self.outcome_hits == other.outcome_hits
    }
}

/// Score every prediction whose match is finished.
///
/// Predictions on scheduled or live matches are skipped. A finished match
/// without a result, or an unknown match, aborts the whole computation.
pub fn score_predictions(
    matches: &[Match],
    predictions: &[Prediction],
    rule: &ScoringRule,
) -> Result<Vec<ScoredPrediction>, RankingError> {
    let matches_by_id: HashMap<Uuid, &Match> = matches.iter().map(|m| (m.id, m)).collect();

    let mut scored = Vec::new();
    for prediction in predictions {
        let game = matches_by_id
            .get(&prediction.match_id)
            .ok_or(RankingError::UnknownMatch {
                user_id: prediction.user_id,
                match_id: prediction.match_id,
            })?;

        if !game.is_finished() {
            continue;
        }

        let (actual_home, actual_away) = game
            .result()
            .ok_or(RankingError::MissingResult { match_id: game.id })?;

        let kind = classify_prediction(
            prediction.home_score,
            prediction.away_score,
            actual_home,
            actual_away,
        )?;

        scored.push(ScoredPrediction {
            user_id: prediction.user_id,
            match_id: game.id,
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            predicted_home: prediction.home_score,
            predicted_away: prediction.away_score,
            actual_home,
            actual_away,
            kind,
            points: kind.points(rule),
        });
    }

    Ok(scored)
}

/// Tie-break order: points, exact hits, outcome hits (all descending), then
/// display name ignoring case, then user id.
fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.exact_hits.cmp(&a.exact_hits))
        .then_with(|| b.outcome_hits.cmp(&a.outcome_hits))
        .then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Aggregate scored predictions into sorted standings.
///
/// Every participant is listed, with zeros if nothing was scored yet. Users
/// that predicted without being registered as participants are listed under
/// their id.
pub fn aggregate_standings(participants: &[Participant], scored: &[ScoredPrediction]) -> Vec<Standing> {
    let mut by_user: HashMap<Uuid, Standing> = participants
        .iter()
        .map(|p| (p.user_id, Standing::empty(p.user_id, p.display_name.clone())))
        .collect();

    for prediction in scored {
        by_user
            .entry(prediction.user_id)
            .or_insert_with(|| Standing::empty(prediction.user_id, prediction.user_id.to_string()))
            .add(prediction);
    }

    let mut standings: Vec<Standing> = by_user.into_values().collect();
    standings.sort_by(compare_standings);

    // Competition ranking: 1, 2, 2, 4
    for index in 0..standings.len() {
        let position = if index > 0 && standings[index].same_score(&standings[index - 1]) {
            standings[index - 1].position
        } else {
            (index + 1) as u32
        };
        standings[index].position = position;
    }

    standings
}

/// Score and rank a complete set of predictions
pub fn compute_standings(
    participants: &[Participant],
    matches: &[Match],
    predictions: &[Prediction],
    rule: &ScoringRule,
) -> Result<Vec<Standing>, RankingError> {
    let scored = score_predictions(matches, predictions, rule)?;
    Ok(aggregate_standings(participants, &scored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::championship::MatchStatus;

    fn finished(id: Uuid, home: i32, away: i32) -> Match {
        Match {
            id,
            championship_id: Uuid::nil(),
            home_team: "Home".into(),
            away_team: "Away".into(),
            home_score: Some(home),
            away_score: Some(away),
            status: MatchStatus::Finished,
            kickoff_at: chrono::Utc::now(),
        }
    }

    fn predict(user_id: Uuid, match_id: Uuid, home: i32, away: i32) -> Prediction {
        Prediction {
            user_id,
            match_id,
            home_score: home,
            away_score: away,
        }
    }

    #[test]
    fn test_competition_positions() {
        let game = Uuid::new_v4();
        let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let participants = vec![
            Participant { user_id: a, display_name: "Ana".into() },
            Participant { user_id: b, display_name: "Bruno".into() },
            Participant { user_id: c, display_name: "Carla".into() },
            Participant { user_id: d, display_name: "Davi".into() },
        ];
        let predictions = vec![
            predict(a, game, 2, 1),
            predict(b, game, 1, 0),
            predict(c, game, 3, 0),
            predict(d, game, 0, 0),
        ];

        let standings = compute_standings(
            &participants,
            &[finished(game, 2, 1)],
            &predictions,
            &ScoringRule::DEFAULT,
        )
        .unwrap();

        let positions: Vec<(String, u32)> = standings
            .iter()
            .map(|s| (s.display_name.clone(), s.position))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("Ana".to_string(), 1),
                ("Bruno".to_string(), 2),
                ("Carla".to_string(), 2),
                ("Davi".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_missing_result_is_reported() {
        let game = Uuid::new_v4();
        let user = Uuid::new_v4();
        let mut broken = finished(game, 0, 0);
        broken.away_score = None;

        let err = compute_standings(&[], &[broken], &[predict(user, game, 1, 0)], &ScoringRule::DEFAULT)
            .unwrap_err();
        assert_eq!(err, RankingError::MissingResult { match_id: game });
        assert!(err.is_incomplete_data());
    }

    #[test]
    fn test_large_rule_totals_do_not_overflow() {
        let user = Uuid::new_v4();
        let rule = ScoringRule::from_columns(i32::MAX, 1).unwrap();
        let games: Vec<Match> = (0..3).map(|_| finished(Uuid::new_v4(), 1, 0)).collect();
        let predictions: Vec<Prediction> = games.iter().map(|g| predict(user, g.id, 1, 0)).collect();

        let standings = compute_standings(&[], &games, &predictions, &rule).unwrap();
        assert_eq!(standings[0].total_points, 3 * i32::MAX as u64);
        assert_eq!(standings[0].exact_hits, 3);
    }
}
