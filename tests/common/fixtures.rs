use chrono::{Duration, Utc};
use uuid::Uuid;

use bolao_backend::models::championship::{
    Championship, ChampionshipSnapshot, ChampionshipStatus, Match, MatchStatus, Participant,
    Prediction, TeamSelection,
};
use bolao_backend::scoring::ScoringRule;

/// Builds championship snapshots for tests
pub struct ChampionshipFixture {
    snapshot: ChampionshipSnapshot,
}

impl ChampionshipFixture {
    pub fn new(name: &str) -> Self {
        Self {
            snapshot: ChampionshipSnapshot {
                championship: Championship {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    scoring_rule: ScoringRule::DEFAULT,
                    enable_selection_priority: true,
                    status: ChampionshipStatus::Ranked,
                },
                participants: Vec::new(),
                matches: Vec::new(),
                predictions: Vec::new(),
                team_selections: Vec::new(),
                official_ranking: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> Uuid {
        self.snapshot.championship.id
    }

    pub fn rule(&mut self, rule: ScoringRule) -> &mut Self {
        self.snapshot.championship.scoring_rule = rule;
        self
    }

    pub fn status(&mut self, status: ChampionshipStatus) -> &mut Self {
        self.snapshot.championship.status = status;
        self
    }

    pub fn selection_priority(&mut self, enabled: bool) -> &mut Self {
        self.snapshot.championship.enable_selection_priority = enabled;
        self
    }

    pub fn participant(&mut self, display_name: &str) -> Uuid {
        let user_id = Uuid::new_v4();
        self.snapshot.participants.push(Participant {
            user_id,
            display_name: display_name.to_string(),
        });
        user_id
    }

    fn add_match(&mut self, home: &str, away: &str, score: Option<(i32, i32)>, status: MatchStatus) -> Uuid {
        let id = Uuid::new_v4();
        let kickoff_at = Utc::now() + Duration::hours(self.snapshot.matches.len() as i64);
        self.snapshot.matches.push(Match {
            id,
            championship_id: self.id(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: score.map(|(home, _)| home),
            away_score: score.map(|(_, away)| away),
            status,
            kickoff_at,
        });
        id
    }

    pub fn finished_match(&mut self, home: &str, away: &str, home_score: i32, away_score: i32) -> Uuid {
        self.add_match(home, away, Some((home_score, away_score)), MatchStatus::Finished)
    }

    pub fn scheduled_match(&mut self, home: &str, away: &str) -> Uuid {
        self.add_match(home, away, None, MatchStatus::Scheduled)
    }

    pub fn live_match(&mut self, home: &str, away: &str, home_score: i32, away_score: i32) -> Uuid {
        self.add_match(home, away, Some((home_score, away_score)), MatchStatus::Live)
    }

    /// Finished according to its status, but the score was never entered
    pub fn finished_match_without_result(&mut self, home: &str, away: &str) -> Uuid {
        self.add_match(home, away, None, MatchStatus::Finished)
    }

    pub fn predict(&mut self, user_id: Uuid, match_id: Uuid, home_score: i32, away_score: i32) -> &mut Self {
        self.snapshot.predictions.push(Prediction {
            user_id,
            match_id,
            home_score,
            away_score,
        });
        self
    }

    pub fn select(&mut self, user_id: Uuid, teams: &[&str]) -> &mut Self {
        self.snapshot.team_selections.push(TeamSelection {
            user_id,
            teams: teams.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    pub fn rank(&mut self, teams: &[&str]) -> &mut Self {
        self.snapshot.official_ranking = teams.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn snapshot(&self) -> ChampionshipSnapshot {
        self.snapshot.clone()
    }
}

pub fn selection(user_id: Uuid, teams: &[&str]) -> TeamSelection {
    TeamSelection {
        user_id,
        teams: teams.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn ranking(teams: &[&str]) -> Vec<String> {
    teams.iter().map(|t| t.to_string()).collect()
}
