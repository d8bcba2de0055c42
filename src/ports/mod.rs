//! Ports layer: Trait definitions for collaborators of the calculator.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the scoring session and whatever presents its results.

mod observer;

pub use observer::RiskObserver;
