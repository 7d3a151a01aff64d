//! Run orchestration services

pub mod checker;
pub mod scraper;

pub use checker::CheckerService;
pub use scraper::{merge_channels, ScrapeOutcome, ScraperService};
