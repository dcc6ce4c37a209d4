use crate::inference::window::{Prediction, Window, WindowClassifier};
use crate::prelude::{PipelineError, PipelineResult};
use crate::telemetry::log::LogManager;
use std::sync::Arc;

/// Thin boundary in front of the external classifier: forwards one batch,
/// checks the response against the contract, and assigns binary labels.
/// Single-shot per request, no retries, no caching.
#[derive(Clone)]
pub struct InferenceAdapter {
    classifier: Arc<dyn WindowClassifier>,
    logger: Arc<LogManager>,
}

impl InferenceAdapter {
    pub fn new(classifier: Arc<dyn WindowClassifier>) -> Self {
        Self {
            classifier,
            logger: Arc::new(LogManager::new()),
        }
    }

    /// Explicit load/validate step; call once at startup so a missing model
    /// fails fast instead of failing the first request.
    pub fn validate(&self) -> PipelineResult<()> {
        self.classifier.ready()
    }

    pub fn predict(&self, batch: &[Window]) -> PipelineResult<Vec<Prediction>> {
        if batch.is_empty() {
            return Err(PipelineError::InsufficientData(
                "empty window batch; the signal is shorter than one window".into(),
            ));
        }

        let probabilities = self.classifier.classify(batch)?;
        if probabilities.len() != batch.len() {
            return Err(PipelineError::Internal(format!(
                "classifier returned {} probabilities for {} windows",
                probabilities.len(),
                batch.len()
            )));
        }

        let mut predictions = Vec::with_capacity(batch.len());
        for (index, &probability) in probabilities.iter().enumerate() {
            if !(0.0..=1.0).contains(&probability) {
                return Err(PipelineError::Internal(format!(
                    "probability {} for window {} is outside [0, 1]",
                    probability, index
                )));
            }
            predictions.push(Prediction::new(index, probability));
        }
        self.logger.record(&format!(
            "InferenceAdapter classified {} windows",
            predictions.len()
        ));
        Ok(predictions)
    }
}
