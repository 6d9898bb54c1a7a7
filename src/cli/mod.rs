pub mod chains;
pub mod config;
pub mod report;
