pub mod highlander;
pub mod standings;

pub use highlander::{compute_highlander, HighlanderOutcome, SelectionHighlight};
pub use standings::{aggregate_standings, compute_standings, score_predictions, RankingError, ScoredPrediction, Standing};
