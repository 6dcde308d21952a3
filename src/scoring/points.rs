use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Points awarded for a prediction, configured per championship
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    pub exact_score_points: u32,
    pub winner_points: u32,
}

impl ScoringRule {
    /// Rule used by championships that do not configure their own
    pub const DEFAULT: ScoringRule = ScoringRule {
        exact_score_points: 3,
        winner_points: 1,
    };

    pub fn new(exact_score_points: u32, winner_points: u32) -> Self {
        Self {
            exact_score_points,
            winner_points,
        }
    }

    /// Build a rule from the signed columns stored by the platform
    pub fn from_columns(exact_score_points: i32, winner_points: i32) -> Result<Self, ScoreError> {
        match (u32::try_from(exact_score_points), u32::try_from(winner_points)) {
            (Ok(exact), Ok(winner)) => Ok(Self::new(exact, winner)),
            _ => Err(ScoreError::InvalidRule {
                exact_score_points: exact_score_points as i64,
                winner_points: winner_points as i64,
            }),
        }
    }

    /// Both values must fit the platform's `integer` columns
    pub fn validate(&self) -> Result<(), ScoreError> {
        let limit = i32::MAX as u32;
        if self.exact_score_points > limit || self.winner_points > limit {
            return Err(ScoreError::InvalidRule {
                exact_score_points: self.exact_score_points as i64,
                winner_points: self.winner_points as i64,
            });
        }
        Ok(())
    }
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Invalid score {home}-{away}: goals cannot be negative")]
    InvalidScore { home: i32, away: i32 },

    #[error("Invalid scoring rule: exact={exact_score_points}, winner={winner_points}")]
    InvalidRule {
        exact_score_points: i64,
        winner_points: i64,
    },
}

/// Outcome category of a score line
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn from_scores(home: u32, away: u32) -> Self {
        if home > away {
            Outcome::HomeWin
        } else if home < away {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Outcome::HomeWin => "home win",
            Outcome::AwayWin => "away win",
            Outcome::Draw => "draw",
        };
        write!(f, "{}", label)
    }
}

/// Which scoring rule a prediction hit
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    /// Exact score line ("bucha")
    Exact,
    /// Right outcome, wrong score line ("situação")
    Outcome,
    Miss,
}

impl PredictionKind {
    pub fn points(&self, rule: &ScoringRule) -> u32 {
        match self {
            PredictionKind::Exact => rule.exact_score_points,
            PredictionKind::Outcome => rule.winner_points,
            PredictionKind::Miss => 0,
        }
    }
}

fn non_negative(home: i32, away: i32) -> Result<(u32, u32), ScoreError> {
    match (u32::try_from(home), u32::try_from(away)) {
        (Ok(home), Ok(away)) => Ok((home, away)),
        _ => Err(ScoreError::InvalidScore { home, away }),
    }
}

/// Classify a prediction against the final result.
///
/// Exact match is checked first, so an exact prediction is never reported as
/// an outcome hit even when both rules award the same points.
pub fn classify_prediction(
    predicted_home: i32,
    predicted_away: i32,
    actual_home: i32,
    actual_away: i32,
) -> Result<PredictionKind, ScoreError> {
    let (predicted_home, predicted_away) = non_negative(predicted_home, predicted_away)?;
    let (actual_home, actual_away) = non_negative(actual_home, actual_away)?;

    if predicted_home == actual_home && predicted_away == actual_away {
        return Ok(PredictionKind::Exact);
    }

    if Outcome::from_scores(predicted_home, predicted_away)
        == Outcome::from_scores(actual_home, actual_away)
    {
        return Ok(PredictionKind::Outcome);
    }

    Ok(PredictionKind::Miss)
}

/// Points a prediction earns under `rule`
pub fn calculate_points(
    predicted_home: i32,
    predicted_away: i32,
    actual_home: i32,
    actual_away: i32,
    rule: &ScoringRule,
) -> Result<u32, ScoreError> {
    classify_prediction(predicted_home, predicted_away, actual_home, actual_away)
        .map(|kind| kind.points(rule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_scenario() {
        let rule = ScoringRule::DEFAULT;
        assert_eq!(calculate_points(2, 1, 2, 1, &rule), Ok(3));
        assert_eq!(calculate_points(3, 1, 2, 1, &rule), Ok(1));
        assert_eq!(calculate_points(1, 2, 2, 1, &rule), Ok(0));
        assert_eq!(calculate_points(1, 1, 2, 1, &rule), Ok(0));
    }

    #[test]
    fn test_draws() {
        let rule = ScoringRule::DEFAULT;
        assert_eq!(calculate_points(0, 0, 0, 0, &rule), Ok(3));
        assert_eq!(calculate_points(2, 2, 1, 1, &rule), Ok(1));
        assert_eq!(calculate_points(0, 1, 1, 1, &rule), Ok(0));
    }

    #[test]
    fn test_exact_dominates_when_rules_are_equal() {
        let rule = ScoringRule::new(2, 2);
        assert_eq!(classify_prediction(1, 0, 1, 0), Ok(PredictionKind::Exact));
        assert_eq!(calculate_points(1, 0, 1, 0, &rule), Ok(2));
    }

    #[test]
    fn test_negative_scores_are_rejected() {
        let rule = ScoringRule::DEFAULT;
        assert_eq!(
            calculate_points(-1, 0, 1, 0, &rule),
            Err(ScoreError::InvalidScore { home: -1, away: 0 })
        );
        assert_eq!(
            calculate_points(1, 0, 1, -3, &rule),
            Err(ScoreError::InvalidScore { home: 1, away: -3 })
        );
    }

    #[test]
    fn test_result_is_always_one_of_the_rule_values() {
        let rule = ScoringRule::new(5, 2);
        for ph in 0..4 {
            for pa in 0..4 {
                for ah in 0..4 {
                    for aa in 0..4 {
                        let points = calculate_points(ph, pa, ah, aa, &rule).unwrap();
                        assert!([0, 2, 5].contains(&points));
                    }
                }
            }
        }
    }

    #[test]
    fn test_rule_from_columns() {
        assert_eq!(ScoringRule::from_columns(3, 1), Ok(ScoringRule::DEFAULT));
        assert!(ScoringRule::from_columns(-1, 1).is_err());
        assert!(ScoringRule::new(u32::MAX, 0).validate().is_err());
        assert!(ScoringRule::DEFAULT.validate().is_ok());
    }
}
