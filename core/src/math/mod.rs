pub mod butterworth;
pub mod iir;
pub mod matrix;
pub mod stats;

pub use butterworth::{butter_bandpass, BandpassDesign};
pub use iir::{filtfilt, lfilter, lfilter_zi};
pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
