//! Stream probing: two-phase liveness checks, classification, health scoring

pub mod classifier;
pub mod health;
pub mod prober;

pub use classifier::classify_stream;
pub use health::{apply_probe_result, nudge_health_score};
pub use prober::StreamProber;
