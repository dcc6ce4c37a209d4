use crate::inference::window::Prediction;
use serde::{Deserialize, Serialize};

/// Aggregate outcome over the full window batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RhythmSummary {
    pub af_percentage: f64,
    pub window_count: usize,
    pub af_windows: usize,
}

/// Reduces per-window predictions to the AF share. Pure and deterministic;
/// always computed over the whole batch.
pub fn aggregate(predictions: &[Prediction]) -> RhythmSummary {
    if predictions.is_empty() {
        return RhythmSummary::default();
    }
    let af_windows = predictions.iter().filter(|p| p.label == 1).count();
    RhythmSummary {
        af_percentage: 100.0 * af_windows as f64 / predictions.len() as f64,
        window_count: predictions.len(),
        af_windows,
    }
}
