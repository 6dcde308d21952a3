pub mod points;

pub use points::{calculate_points, classify_prediction, Outcome, PredictionKind, ScoreError, ScoringRule};
