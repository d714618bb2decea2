//! Signal processing
//!
//! Smoothing, severity classification and the processor facade that ties
//! them to the monitor registry.

pub mod classifier;
pub mod filter;
pub mod processor;

pub use classifier::NoiseClassifier;
pub use filter::{ExponentialFilter, SmoothedSignal};
pub use processor::SignalProcessor;
