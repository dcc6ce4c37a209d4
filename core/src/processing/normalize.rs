use crate::math::stats::StatsHelper;
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, SignalStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Zero-mean unit-variance rescaling stage.
pub struct NormalizeStage {
    pool: BufferPool,
    logger: LogManager,
}

impl NormalizeStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            logger: LogManager::new(),
        }
    }
}

impl SignalStage for NormalizeStage {
    fn initialize(&mut self, _config: &PipelineConfig) -> PipelineResult<()> {
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        if input.samples.is_empty() {
            return Err(PipelineError::InsufficientData(
                "no samples to normalize".into(),
            ));
        }

        let mean = StatsHelper::mean(&input.samples);
        let std_dev = StatsHelper::std_dev(&input.samples);
        if std_dev <= 0.0 {
            return Err(PipelineError::DegenerateSignal(format!(
                "constant signal (mean {:.6}); unit-variance rescaling is undefined",
                mean
            )));
        }

        let mut buffer = self.pool.checkout(input.samples.len())?;
        for (slot, &value) in buffer.iter_mut().zip(&input.samples) {
            *slot = (value - mean) / std_dev;
        }
        self.logger.record(&format!(
            "NormalizeStage mean {:.6} std {:.6}",
            mean, std_dev
        ));

        let metadata = StageMetadata {
            notes: vec![format!("removed mean {:.6}, scale {:.6}", mean, std_dev)],
            ..Default::default()
        };

        Ok(StageOutput {
            samples: buffer,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(samples: Vec<f64>) -> PipelineResult<StageOutput> {
        let mut stage = NormalizeStage::new(1);
        stage.initialize(&PipelineConfig::default())?;
        let output = stage.execute(StageInput { samples });
        stage.cleanup();
        output
    }

    #[test]
    fn output_has_zero_mean_unit_deviation() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 3.0 + 7.5).collect();
        let output = run(samples).unwrap();
        assert!(StatsHelper::mean(&output.samples).abs() < 1e-6);
        assert!((StatsHelper::std_dev(&output.samples) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn constant_signal_is_degenerate() {
        assert!(matches!(
            run(vec![3.25; 64]),
            Err(PipelineError::DegenerateSignal(_))
        ));
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert!(matches!(
            run(Vec::new()),
            Err(PipelineError::InsufficientData(_))
        ));
    }

    #[test]
    fn stage_handles_consecutive_executions() {
        let mut stage = NormalizeStage::new(1);
        stage.initialize(&PipelineConfig::default()).unwrap();
        for _ in 0..3 {
            let output = stage
                .execute(StageInput {
                    samples: vec![0.0, 2.0],
                })
                .unwrap();
            assert_eq!(output.samples, vec![-1.0, 1.0]);
        }
    }

    #[test]
    fn two_point_signal_normalizes_exactly() {
        let output = run(vec![0.0, 2.0]).unwrap();
        assert_eq!(output.samples, vec![-1.0, 1.0]);
    }
}
