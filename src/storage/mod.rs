//! JSON persistence for the channel set and daily probe reports

pub mod report;
pub mod store;

pub use report::ReportWriter;
pub use store::ChannelStore;
