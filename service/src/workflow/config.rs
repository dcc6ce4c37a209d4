use anyhow::Context;
use ppgcore::prelude::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_model_url() -> String {
    "http://127.0.0.1:8501/v1/models/ppg_af_lstm".to_string()
}

/// Request-level settings exposed by the upload surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub fs_hz: f64,
    pub window_sec: f64,
    pub overlap_sec: f64,
    #[serde(default = "default_model_url")]
    pub model_url: String,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(fs_hz: f64, window_sec: f64, overlap_sec: f64, model_url: String) -> Self {
        Self {
            fs_hz,
            window_sec,
            overlap_sec,
            model_url,
        }
    }

    /// Enforces the ranges the upload surface advertises for its sliders.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.fs_hz > 16.0,
            "sampling rate {} Hz leaves no room below Nyquist for the 8 Hz corner",
            self.fs_hz
        );
        anyhow::ensure!(
            (1.0..=20.0).contains(&self.window_sec),
            "window length {} s outside [1, 20]",
            self.window_sec
        );
        anyhow::ensure!(
            (0.5..=10.0).contains(&self.overlap_sec),
            "overlap {} s outside [0.5, 10]",
            self.overlap_sec
        );
        anyhow::ensure!(
            self.overlap_sec < self.window_sec,
            "overlap {} s must be shorter than the {} s window",
            self.overlap_sec,
            self.window_sec
        );
        Ok(())
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fs_hz: self.fs_hz,
            window_sec: self.window_sec,
            overlap_sec: self.overlap_sec,
            ..PipelineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_pipeline_config() {
        let cfg = WorkflowConfig::from_args(125.0, 5.0, 2.5, default_model_url());
        assert!(cfg.validate().is_ok());
        let pipeline = cfg.to_pipeline_config();
        assert_eq!(pipeline.window_len(), 625);
        assert_eq!(pipeline.filter_order, 3);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"fs_hz: 125.0\nwindow_sec: 8.0\noverlap_sec: 4.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.window_sec, 8.0);
        assert_eq!(cfg.model_url, default_model_url());
    }

    #[test]
    fn slider_ranges_are_enforced() {
        let base = WorkflowConfig::from_args(125.0, 5.0, 2.5, default_model_url());
        let mut cfg = base.clone();
        cfg.window_sec = 25.0;
        assert!(cfg.validate().is_err());
        let mut cfg = base.clone();
        cfg.overlap_sec = 0.1;
        assert!(cfg.validate().is_err());
        let mut cfg = base.clone();
        cfg.overlap_sec = 6.0;
        cfg.window_sec = 6.0;
        assert!(cfg.validate().is_err());
        let mut cfg = base;
        cfg.fs_hz = 16.0;
        assert!(cfg.validate().is_err());
    }
}
