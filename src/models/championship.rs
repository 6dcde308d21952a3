// src/models/championship.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::scoring::ScoringRule;

/// Lifecycle of a championship ("campeonato").
///
/// Transitions are driven by the platform (kick-off times, admin actions);
/// this service only reads the current value.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChampionshipStatus {
    RankingOpen,
    Locked,
    Ranked,
    Final,
}

impl ChampionshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChampionshipStatus::RankingOpen => "ranking_open",
            ChampionshipStatus::Locked => "locked",
            ChampionshipStatus::Ranked => "ranked",
            ChampionshipStatus::Final => "final",
        }
    }

    /// Participants may still change their team selections
    pub fn selections_editable(&self) -> bool {
        matches!(self, ChampionshipStatus::RankingOpen)
    }

    /// An official ranking may have been published
    pub fn official_ranking_visible(&self) -> bool {
        matches!(self, ChampionshipStatus::Ranked | ChampionshipStatus::Final)
    }
}

impl From<String> for ChampionshipStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "locked" => ChampionshipStatus::Locked,
            "ranked" => ChampionshipStatus::Ranked,
            "final" => ChampionshipStatus::Final,
            _ => ChampionshipStatus::RankingOpen,
        }
    }
}

impl fmt::Display for ChampionshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Championship {
    pub id: Uuid,
    pub name: String,
    pub scoring_rule: ScoringRule,
    /// When false the Highlander degrades to plain hits without a winner
    pub enable_selection_priority: bool,
    pub status: ChampionshipStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Participant {
    pub user_id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "live" => MatchStatus::Live,
            "finished" => MatchStatus::Finished,
            _ => MatchStatus::Scheduled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub championship_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
    pub kickoff_at: DateTime<Utc>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Final score, if both sides have been recorded
    pub fn result(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

/// A participant's guess ("palpite") for one match
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
}

/// Favorite teams in priority order, index 0 first
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamSelection {
    pub user_id: Uuid,
    pub teams: Vec<String>,
}

/// Everything the ranking needs, read in one go
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChampionshipSnapshot {
    pub championship: Championship,
    pub participants: Vec<Participant>,
    pub matches: Vec<Match>,
    pub predictions: Vec<Prediction>,
    pub team_selections: Vec<TeamSelection>,
    /// 1st place first; unfilled slots are empty strings
    pub official_ranking: Vec<String>,
}

impl ChampionshipSnapshot {
    pub fn participant(&self, user_id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(ChampionshipStatus::from("Ranked".to_string()), ChampionshipStatus::Ranked);
        assert_eq!(ChampionshipStatus::from("unknown".to_string()), ChampionshipStatus::RankingOpen);
        assert_eq!(MatchStatus::from("FINISHED".to_string()), MatchStatus::Finished);
        assert_eq!(ChampionshipStatus::Final.to_string(), "final");
    }

    #[test]
    fn test_status_helpers() {
        assert!(ChampionshipStatus::RankingOpen.selections_editable());
        assert!(!ChampionshipStatus::Locked.selections_editable());
        assert!(!ChampionshipStatus::Locked.official_ranking_visible());
        assert!(ChampionshipStatus::Ranked.official_ranking_visible());
        assert!(ChampionshipStatus::Final.official_ranking_visible());
    }
}
