pub mod adapter;
pub mod summary;
pub mod window;

pub use adapter::InferenceAdapter;
pub use summary::{aggregate, RhythmSummary};
pub use window::{Prediction, Window, WindowClassifier};
