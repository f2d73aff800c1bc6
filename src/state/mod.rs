/// State module
///
/// This module holds the data that flows through the pipeline:
/// - Configuration and heuristic thresholds (config.rs)
/// - Shared result structures (data.rs)

pub mod config;
pub mod data;
