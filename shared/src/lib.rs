//! BMI Insight Shared Library
//!
//! This crate contains the health metrics engine and the types shared by the
//! backend API and the WASM bindings. Everything here is pure and
//! synchronous: each calculation is independent, reentrant, and safe to run
//! concurrently from any number of callers.

pub mod advice;
pub mod gauge;
pub mod health_metrics;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use advice::generate_health_advice;
pub use gauge::needle_angle;
pub use health_metrics::*;
pub use types::*;
pub use units::*;
