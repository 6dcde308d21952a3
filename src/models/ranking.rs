use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::championship::{Championship, Participant};
use crate::ranking::{HighlanderOutcome, ScoredPrediction, SelectionHighlight, Standing};

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub championship: Championship,
    pub standings: Vec<Standing>,
    pub finished_matches: usize,
    pub total_matches: usize,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PickView {
    pub slot: usize,
    pub team: String,
    pub highlight: SelectionHighlight,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SelectionView {
    pub user_id: Uuid,
    pub display_name: String,
    pub is_winner: bool,
    pub picks: Vec<PickView>,
}

#[derive(Debug, Serialize)]
pub struct HighlanderResponse {
    pub championship_id: Uuid,
    pub enable_selection_priority: bool,
    /// Participants can no longer change their picks
    pub selections_locked: bool,
    pub official_ranking: Vec<String>,
    pub outcome: HighlanderOutcome,
    pub selections: Vec<SelectionView>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub championship: Championship,
    pub standings: Vec<Standing>,
    pub highlander: HighlanderResponse,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScorecardResponse {
    pub championship_id: Uuid,
    pub participant: Participant,
    pub standing: Standing,
    pub predictions: Vec<ScoredPrediction>,
}
