use crate::inference::window::Window;
use crate::prelude::{PipelineConfig, PipelineError, PipelineResult};
use crate::telemetry::log::LogManager;

/// Sliding-window extractor producing fixed-length, non-aliased segments in
/// temporal order.
pub struct Segmenter {
    window_len: usize,
    stride: usize,
    logger: LogManager,
}

impl Segmenter {
    pub fn from_config(config: &PipelineConfig) -> PipelineResult<Self> {
        let window_len = config.window_len();
        let overlap_len = config.overlap_len();
        if window_len == 0 {
            return Err(PipelineError::InvalidParameter(format!(
                "window of {} s at {} Hz rounds to zero samples",
                config.window_sec, config.fs_hz
            )));
        }
        if overlap_len >= window_len {
            return Err(PipelineError::InvalidParameter(format!(
                "overlap of {} samples leaves no forward stride for {}-sample windows",
                overlap_len, window_len
            )));
        }
        Ok(Self {
            window_len,
            stride: window_len - overlap_len,
            logger: LogManager::new(),
        })
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Extracts every full window. A signal shorter than one window yields an
    /// empty batch, which callers must check before running inference.
    pub fn extract(&self, samples: &[f64]) -> Vec<Window> {
        let mut windows = Vec::new();
        let mut start = 0;
        while start + self.window_len <= samples.len() {
            windows.push(Window {
                start,
                samples: samples[start..start + self.window_len].to_vec(),
            });
            start += self.stride;
        }
        self.logger
            .record(&format!("Segmenter produced {} windows", windows.len()));
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_segmenter() -> Segmenter {
        Segmenter::from_config(&PipelineConfig::default()).unwrap()
    }

    #[test]
    fn default_parameters_convert_to_training_sample_counts() {
        let segmenter = default_segmenter();
        assert_eq!(segmenter.window_len(), 625);
        assert_eq!(segmenter.stride(), 312);
    }

    #[test]
    fn ten_second_default_signal_yields_three_windows() {
        let segmenter = default_segmenter();
        let samples = vec![0.0; 1250];
        let windows = segmenter.extract(&samples);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[1].start, 312);
        assert_eq!(windows[2].start, 624);
        assert!(windows.iter().all(|w| w.samples.len() == 625));
    }

    #[test]
    fn window_count_follows_the_stride_formula() {
        let segmenter = default_segmenter();
        for len in [625usize, 936, 1250, 3000] {
            let windows = segmenter.extract(&vec![0.0; len]);
            let expected = (len - 625) / 312 + 1;
            assert_eq!(windows.len(), expected, "len {}", len);
        }
    }

    #[test]
    fn short_signal_yields_an_empty_batch_not_an_error() {
        let segmenter = default_segmenter();
        assert!(segmenter.extract(&vec![0.0; 500]).is_empty());
        assert!(segmenter.extract(&[]).is_empty());
    }

    #[test]
    fn windows_are_independent_copies() {
        let segmenter = Segmenter::from_config(&PipelineConfig {
            window_sec: 0.04,
            overlap_sec: 0.016,
            ..PipelineConfig::default()
        })
        .unwrap();
        let samples: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let windows = segmenter.extract(&samples);
        // window_len 5, stride 3: overlapping source ranges, distinct copies
        assert!(windows.len() > 2);
        assert_eq!(windows[0].samples[3], windows[1].samples[0]);
    }

    #[test]
    fn overlap_at_least_window_is_rejected() {
        let config = PipelineConfig {
            window_sec: 5.0,
            overlap_sec: 5.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            Segmenter::from_config(&config),
            Err(PipelineError::InvalidParameter(_))
        ));
        let config = PipelineConfig {
            window_sec: 2.0,
            overlap_sec: 6.0,
            ..PipelineConfig::default()
        };
        assert!(Segmenter::from_config(&config).is_err());
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let config = PipelineConfig {
            window_sec: 0.0,
            overlap_sec: 0.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            Segmenter::from_config(&config),
            Err(PipelineError::InvalidParameter(_))
        ));
    }
}
