use crate::math::butterworth::{butter_bandpass, BandpassDesign};
use crate::math::iir::filtfilt;
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, SignalStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::telemetry::log::LogManager;

/// Zero-phase Butterworth bandpass stage isolating the physiological band.
/// Coefficients are designed once at `initialize`, applied forward-backward
/// at `execute`.
pub struct BandpassStage {
    design: Option<BandpassDesign>,
    logger: LogManager,
}

impl BandpassStage {
    pub fn new() -> Self {
        Self {
            design: None,
            logger: LogManager::new(),
        }
    }
}

impl Default for BandpassStage {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalStage for BandpassStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        let design = butter_bandpass(
            config.filter_order,
            config.low_cut_hz,
            config.high_cut_hz,
            config.fs_hz,
        )?;
        self.design = Some(design);
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        let design = self
            .design
            .as_ref()
            .ok_or_else(|| PipelineError::Internal("stage not initialized".into()))?;

        let filtered = filtfilt(design, &input.samples)?;
        self.logger
            .record(&format!("BandpassStage filtered {} samples", filtered.len()));

        Ok(StageOutput {
            samples: filtered,
            metadata: StageMetadata::default(),
        })
    }

    fn cleanup(&mut self) {
        self.design = None;
    }
}
