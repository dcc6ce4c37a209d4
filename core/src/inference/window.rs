use crate::prelude::PipelineResult;
use serde::{Deserialize, Serialize};

/// Fixed-length segment handed to the classifier, tagged with the index of
/// its first sample in the processed signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub samples: Vec<f64>,
}

/// Per-window classifier outcome, index-aligned with the extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub index: usize,
    pub probability: f64,
    pub label: u8,
}

impl Prediction {
    pub fn new(index: usize, probability: f64) -> Self {
        Self {
            index,
            probability,
            label: u8::from(probability > 0.5),
        }
    }
}

/// Boundary contract for the external AF classifier: a pure function from a
/// window batch to one probability per window, in the same order.
///
/// Implementations are injected by the caller at startup. `ready` is the
/// explicit load/validate step and must surface `ModelUnavailable` instead of
/// letting the first batch crash.
pub trait WindowClassifier: Send + Sync {
    fn ready(&self) -> PipelineResult<()>;
    fn classify(&self, batch: &[Window]) -> PipelineResult<Vec<f64>>;
}

impl<F> WindowClassifier for F
where
    F: Fn(&[Window]) -> PipelineResult<Vec<f64>> + Send + Sync,
{
    fn ready(&self) -> PipelineResult<()> {
        Ok(())
    }

    fn classify(&self, batch: &[Window]) -> PipelineResult<Vec<f64>> {
        (self)(batch)
    }
}
