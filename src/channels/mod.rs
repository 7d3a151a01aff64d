//! Channel normalization and deduplication

pub mod dedup;
pub mod normalizer;

pub use dedup::dedupe_channels;
pub use normalizer::{channel_id, normalize_channel};
