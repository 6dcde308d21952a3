//! Favorite-team side competition ("Highlander": only one can win).
//!
//! Participants pick teams in priority order before the tournament starts.
//! Once the official ranking is published, the best-placed team that anybody
//! picked wins, and only the participants who picked it at the best slot
//! used for it are winners. Lower-placed teams never produce winners while a
//! higher-placed team has backers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::championship::TeamSelection;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionHighlight {
    /// Winning team at the winning priority slot
    Winner,
    /// Winning team, but at a worse slot than the winners used
    Superseded,
    /// Team appears in the official ranking
    Hit,
    None,
}

/// Serialize-only: highlights are resolved server side from `ranked_teams`,
/// which is not part of the output.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct HighlanderOutcome {
    /// False until the official ranking has a non-empty slot
    pub applies: bool,
    pub winning_team: Option<String>,
    pub winning_priority_index: Option<usize>,
    pub winners: BTreeSet<Uuid>,
    /// Participants who picked any team of the official ranking
    pub hits: BTreeSet<Uuid>,
    #[serde(skip)]
    ranked_teams: Vec<String>,
}

fn normalize(team: &str) -> String {
    team.trim().to_lowercase()
}

/// Best (lowest) slot at which `selection` lists `team`
fn slot_of(selection: &TeamSelection, team: &str) -> Option<usize> {
    selection
        .teams
        .iter()
        .position(|picked| normalize(picked) == team)
}

impl HighlanderOutcome {
    pub fn is_winner(&self, user_id: Uuid) -> bool {
        self.winners.contains(&user_id)
    }

    /// Display state of the pick `team` placed at `slot` of some selection
    pub fn highlight(&self, team: &str, slot: usize) -> SelectionHighlight {
        if !self.applies {
            return SelectionHighlight::None;
        }

        let team = normalize(team);
        if let (Some(winning_team), Some(winning_index)) =
            (&self.winning_team, self.winning_priority_index)
        {
            if normalize(winning_team) == team {
                return if slot == winning_index {
                    SelectionHighlight::Winner
                } else {
                    SelectionHighlight::Superseded
                };
            }
        }

        if self.ranked_teams.contains(&team) {
            SelectionHighlight::Hit
        } else {
            SelectionHighlight::None
        }
    }
}

/// Resolve the favorite-team competition for the current inputs.
///
/// Pure and idempotent; recompute whenever the official ranking or any
/// selection changes. With `enable_selection_priority` off there is no
/// winning team: every participant with a ranked pick is only a hit.
pub fn compute_highlander(
    official_ranking: &[String],
    selections: &[TeamSelection],
    enable_selection_priority: bool,
) -> HighlanderOutcome {
    let ranked: Vec<(String, &str)> = official_ranking
        .iter()
        .map(|team| (normalize(team), team.trim()))
        .filter(|(normalized, _)| !normalized.is_empty())
        .collect();

    if ranked.is_empty() {
        return HighlanderOutcome::default();
    }

    let ranked_teams: Vec<String> = ranked.iter().map(|(normalized, _)| normalized.clone()).collect();

    let hits: BTreeSet<Uuid> = selections
        .iter()
        .filter(|selection| ranked_teams.iter().any(|team| slot_of(selection, team).is_some()))
        .map(|selection| selection.user_id)
        .collect();

    let mut outcome = HighlanderOutcome {
        applies: true,
        hits,
        ranked_teams,
        ..HighlanderOutcome::default()
    };

    if !enable_selection_priority {
        return outcome;
    }

    for (team, display_name) in &ranked {
        let backers: Vec<(Uuid, usize)> = selections
            .iter()
            .filter_map(|selection| slot_of(selection, team).map(|slot| (selection.user_id, slot)))
            .collect();

        let Some(best_slot) = backers.iter().map(|(_, slot)| *slot).min() else {
            continue;
        };

        outcome.winning_team = Some(display_name.to_string());
        outcome.winning_priority_index = Some(best_slot);
        outcome.winners = backers
            .into_iter()
            .filter(|(_, slot)| *slot == best_slot)
            .map(|(user_id, _)| user_id)
            .collect();
        break;
    }

    tracing::debug!(
        winning_team = ?outcome.winning_team,
        winning_priority_index = ?outcome.winning_priority_index,
        winners = outcome.winners.len(),
        "Resolved highlander"
    );

    outcome
}
