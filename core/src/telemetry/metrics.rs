use std::sync::Mutex;

/// Request-level counters published by the upload bridge.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    requests: usize,
    windows: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                requests: 0,
                windows: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_request(&self, window_count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.requests += 1;
            metrics.windows += window_count;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    /// (requests, windows, errors)
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.requests, metrics.windows, metrics.errors)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
