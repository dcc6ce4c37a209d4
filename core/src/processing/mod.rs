pub mod bandpass;
pub mod buffer_pool;
pub mod normalize;
pub mod sanitize;
pub mod segment;

pub use bandpass::BandpassStage;
pub use buffer_pool::BufferPool;
pub use normalize::NormalizeStage;
pub use sanitize::SanitizeStage;
pub use segment::Segmenter;
