pub mod analyzer;
pub mod config;
pub mod explorer;
pub mod fetch_stats;
pub mod models;
pub mod report;
pub mod summary;
