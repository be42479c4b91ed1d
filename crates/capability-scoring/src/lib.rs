//! Weighted capability assessment scoring.
//!
//! The [`assessment`] module holds the pure scoring core (question-type parsing,
//! per-domain and cross-domain scoring) together with the report, CSV import and
//! HTTP routing layers built on top of it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
