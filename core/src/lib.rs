//! Core signal-processing and inference boundary for the Rust PPG AF platform.
//!
//! The modules mirror the preprocessing chain the classifier was trained on:
//! artifact repair, zero-phase bandpass filtering, normalization, and
//! sliding-window segmentation, with well-defined processing stages and an
//! injected model boundary.

pub mod inference;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{
    PipelineConfig, PipelineError, PipelineResult, SignalStage, StageInput, StageOutput,
};
