pub mod channels;
pub mod classify;
pub mod config;
pub mod errors;
pub mod models;
pub mod probe;
pub mod services;
pub mod sources;
pub mod storage;
pub mod utils;
