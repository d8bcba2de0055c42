//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `logging`: tracing subscriber setup and a tracing-backed observer

pub mod logging;

pub use logging::TracingObserver;
