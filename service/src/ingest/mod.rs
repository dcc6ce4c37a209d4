use anyhow::Context;
use ppgcore::prelude::PipelineError;
use std::path::Path;

pub mod csv;
pub mod mat;

pub use csv::read_csv_signal;
pub use mat::read_mat_signal;

/// Dispatches on the file extension. Anything other than `.mat`/`.csv` is
/// rejected outright instead of falling through with an undefined signal.
pub fn load_signal(path: &Path) -> anyhow::Result<Vec<f64>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("csv") => {
            read_csv_signal(path).with_context(|| format!("reading {}", path.display()))
        }
        Some("mat") => {
            read_mat_signal(path).with_context(|| format!("reading {}", path.display()))
        }
        other => Err(PipelineError::UnsupportedFormat(format!(
            "unrecognized extension '{}'; expected .mat or .csv",
            other.unwrap_or("<none>")
        ))
        .into()),
    }
}
