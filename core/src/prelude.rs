use serde::{Deserialize, Serialize};

/// Shared configuration for the preprocessing chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub fs_hz: f64,
    pub window_sec: f64,
    pub overlap_sec: f64,
    pub low_cut_hz: f64,
    pub high_cut_hz: f64,
    pub filter_order: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fs_hz: 125.0,
            window_sec: 5.0,
            overlap_sec: 2.5,
            low_cut_hz: 0.5,
            high_cut_hz: 8.0,
            filter_order: 3,
        }
    }
}

impl PipelineConfig {
    /// Window length in samples, rounded to the nearest integer.
    pub fn window_len(&self) -> usize {
        (self.window_sec * self.fs_hz).round() as usize
    }

    /// Overlap length in samples, rounded to the nearest integer.
    pub fn overlap_len(&self) -> usize {
        (self.overlap_sec * self.fs_hz).round() as usize
    }
}

/// Input payload for a processing stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub samples: Vec<f64>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub repaired_samples: Option<usize>,
    pub notes: Vec<String>,
}

/// Common error type for pipeline execution.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("filter design rejected: {0}")]
    FilterDesign(String),
    #[error("degenerate signal: {0}")]
    DegenerateSignal(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Trait describing the same-length signal-conditioning stages.
pub trait SignalStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()>;
    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput>;
    fn cleanup(&mut self);
}
