use ppgcore::inference::{Prediction, RhythmSummary};
use serde::{Deserialize, Serialize};

/// Latest request outcome held by the HTTP bridge for download.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResultModel {
    pub summary: RhythmSummary,
    pub predictions: Vec<Prediction>,
    pub repaired_samples: usize,
}
