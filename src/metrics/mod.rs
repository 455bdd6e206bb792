//! Metric aggregation and logging for curriculum training.
//!
//! ## Aggregation
//!
//! - [`MetricsAggregator`]: Thread-safe keyed score store with
//!   mean/max/EMA reduction
//! - [`SharedMetricsAggregator`]: Arc wrapper for multi-threaded access
//!
//! ## Loggers
//!
//! - [`ConsoleLogger`]: Pretty-printed console output
//! - [`CSVLogger`]: CSV file logging for analysis
//! - [`MultiLogger`]: Combine multiple loggers

pub mod aggregator;
pub mod logger;

pub use aggregator::{metrics_aggregator, MetricsAggregator, Reduce, SharedMetricsAggregator};
pub use logger::{CSVLogger, ConsoleLogger, CycleLogger, MultiLogger};
