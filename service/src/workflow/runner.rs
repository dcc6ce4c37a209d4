use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use ppgcore::inference::{aggregate, InferenceAdapter, Prediction, RhythmSummary, WindowClassifier};
use ppgcore::prelude::{PipelineError, SignalStage, StageInput};
use ppgcore::processing::{BandpassStage, NormalizeStage, SanitizeStage, Segmenter};
use std::sync::Arc;

/// Outcome of one classification request.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RhythmSummary,
    pub predictions: Vec<Prediction>,
    pub repaired_samples: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    adapter: InferenceAdapter,
}

impl Runner {
    pub fn new(config: WorkflowConfig, classifier: Arc<dyn WindowClassifier>) -> Self {
        Self {
            config,
            adapter: InferenceAdapter::new(classifier),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Fail-fast model probe, run once at startup.
    pub fn validate_model(&self) -> anyhow::Result<()> {
        self.adapter
            .validate()
            .context("model endpoint refused the readiness probe")?;
        Ok(())
    }

    /// Runs one full request. Every stage is constructed fresh, so concurrent
    /// requests never share buffers or intermediate state.
    pub fn execute(&self, raw: &[f64]) -> anyhow::Result<RunOutcome> {
        let pipeline_config = self.config.to_pipeline_config();

        let mut sanitize = SanitizeStage::new(1);
        sanitize
            .initialize(&pipeline_config)
            .context("initializing sanitize stage")?;
        let sanitized = sanitize
            .execute(StageInput {
                samples: raw.to_vec(),
            })
            .context("repairing signal artifacts")?;
        sanitize.cleanup();
        let repaired_samples = sanitized.metadata.repaired_samples.unwrap_or(0);

        let mut bandpass = BandpassStage::new();
        bandpass
            .initialize(&pipeline_config)
            .context("designing bandpass filter")?;
        let filtered = bandpass
            .execute(StageInput {
                samples: sanitized.samples,
            })
            .context("applying zero-phase filter")?;
        bandpass.cleanup();

        let mut normalize = NormalizeStage::new(1);
        normalize
            .initialize(&pipeline_config)
            .context("initializing normalize stage")?;
        let normalized = normalize
            .execute(StageInput {
                samples: filtered.samples,
            })
            .context("normalizing signal")?;
        normalize.cleanup();

        let segmenter = Segmenter::from_config(&pipeline_config).context("configuring segmenter")?;
        let windows = segmenter.extract(&normalized.samples);
        if windows.is_empty() {
            return Err(PipelineError::InsufficientData(format!(
                "{} samples is shorter than one {}-sample window",
                normalized.samples.len(),
                segmenter.window_len()
            ))
            .into());
        }

        let predictions = self
            .adapter
            .predict(&windows)
            .context("classifying windows")?;
        let summary = aggregate(&predictions);

        Ok(RunOutcome {
            summary,
            predictions,
            repaired_samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::synthetic::{build_ppg_signal, GeneratorConfig};
    use ppgcore::inference::Window;
    use ppgcore::prelude::PipelineResult;

    fn test_config() -> WorkflowConfig {
        WorkflowConfig::from_args(125.0, 5.0, 2.5, "http://unused".into())
    }

    fn mean_abs_classifier() -> Arc<dyn WindowClassifier> {
        Arc::new(|batch: &[Window]| -> PipelineResult<Vec<f64>> {
            Ok(batch
                .iter()
                .map(|w| {
                    let energy =
                        w.samples.iter().map(|v| v.abs()).sum::<f64>() / w.samples.len() as f64;
                    energy.min(1.0)
                })
                .collect())
        })
    }

    #[test]
    fn ten_second_sinusoid_runs_end_to_end() {
        let runner = Runner::new(test_config(), mean_abs_classifier());
        let samples = build_ppg_signal(&GeneratorConfig::default());
        assert_eq!(samples.len(), 1250);
        let outcome = runner.execute(&samples).unwrap();
        assert_eq!(outcome.summary.window_count, 3);
        assert_eq!(outcome.predictions.len(), 3);
        assert_eq!(outcome.repaired_samples, 0);
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let runner = Runner::new(test_config(), mean_abs_classifier());
        let samples = build_ppg_signal(&GeneratorConfig {
            noise: 0.05,
            artifact_count: 10,
            seed: 7,
            ..GeneratorConfig::default()
        });
        let first = runner.execute(&samples).unwrap();
        let second = runner.execute(&samples).unwrap();
        assert_eq!(first.predictions, second.predictions);
        assert_eq!(first.summary, second.summary);
        assert!(first.repaired_samples > 0);
    }

    #[test]
    fn artifacted_signal_is_repaired_before_filtering() {
        let runner = Runner::new(test_config(), mean_abs_classifier());
        let mut samples = build_ppg_signal(&GeneratorConfig::default());
        samples[100] = f64::NAN;
        samples[101] = f64::INFINITY;
        let outcome = runner.execute(&samples).unwrap();
        assert_eq!(outcome.repaired_samples, 2);
        assert_eq!(outcome.summary.window_count, 3);
    }

    #[test]
    fn short_signal_surfaces_insufficient_data() {
        let runner = Runner::new(test_config(), mean_abs_classifier());
        let samples = build_ppg_signal(&GeneratorConfig {
            duration_sec: 4.0,
            ..GeneratorConfig::default()
        });
        let err = runner.execute(&samples).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InsufficientData(_))
        ));
    }

    #[test]
    fn silent_recording_is_degenerate() {
        let runner = Runner::new(test_config(), mean_abs_classifier());
        let err = runner.execute(&vec![0.0; 1250]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::DegenerateSignal(_))
        ));
    }

    #[test]
    fn model_failure_propagates_to_the_caller() {
        struct DownModel;
        impl WindowClassifier for DownModel {
            fn ready(&self) -> PipelineResult<()> {
                Err(PipelineError::ModelUnavailable("no endpoint".into()))
            }
            fn classify(&self, _batch: &[Window]) -> PipelineResult<Vec<f64>> {
                Err(PipelineError::ModelUnavailable("no endpoint".into()))
            }
        }
        let runner = Runner::new(test_config(), Arc::new(DownModel));
        assert!(runner.validate_model().is_err());
        let samples = build_ppg_signal(&GeneratorConfig::default());
        let err = runner.execute(&samples).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ModelUnavailable(_))
        ));
    }
}
