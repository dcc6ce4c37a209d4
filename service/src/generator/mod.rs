pub mod synthetic;

pub use synthetic::{build_ppg_signal, GeneratorConfig};
