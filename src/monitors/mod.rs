//! Rolling-window noise statistics
//!
//! Independently configured monitors fed with every smoothed sample.

mod registry;
mod statistics;

pub use registry::MonitorRegistry;
pub use statistics::StatisticsMonitor;
