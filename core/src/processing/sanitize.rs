use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, SignalStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Artifact-repair stage that replaces non-finite samples by linear
/// interpolation over the nearest finite neighbors by index.
pub struct SanitizeStage {
    pool: BufferPool,
    logger: LogManager,
}

impl SanitizeStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            logger: LogManager::new(),
        }
    }
}

impl SignalStage for SanitizeStage {
    fn initialize(&mut self, _config: &PipelineConfig) -> PipelineResult<()> {
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        let samples = &input.samples;
        let finite: Vec<usize> = samples
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, _)| i)
            .collect();
        if finite.len() < 2 {
            return Err(PipelineError::InsufficientData(format!(
                "{} finite samples out of {}; artifact interpolation needs at least 2",
                finite.len(),
                samples.len()
            )));
        }

        let mut repaired = self.pool.checkout(samples.len())?;
        repaired.copy_from_slice(samples);
        let broken = samples.len() - finite.len();
        if broken > 0 {
            for idx in 0..samples.len() {
                if !samples[idx].is_finite() {
                    repaired[idx] = interpolate_at(idx, &finite, samples);
                }
            }
        }
        self.logger
            .record(&format!("SanitizeStage repaired {} samples", broken));

        let metadata = StageMetadata {
            repaired_samples: Some(broken),
            ..Default::default()
        };

        Ok(StageOutput {
            samples: repaired,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
    }
}

/// Position-based linear interpolation at `idx` over the sorted finite
/// indices; runs beyond either end clamp to the nearest finite value.
fn interpolate_at(idx: usize, finite: &[usize], samples: &[f64]) -> f64 {
    match finite.binary_search(&idx) {
        Ok(pos) => samples[finite[pos]],
        Err(pos) => {
            if pos == 0 {
                samples[finite[0]]
            } else if pos == finite.len() {
                samples[finite[finite.len() - 1]]
            } else {
                let left = finite[pos - 1];
                let right = finite[pos];
                let t = (idx - left) as f64 / (right - left) as f64;
                samples[left] + t * (samples[right] - samples[left])
            }
        }
    }
}
