//! # Shroud - PII anonymization engine
//!
//! Shroud replaces personally identifiable information in text with
//! operator-generated substitutes, given entity spans found by an external
//! detector, and recovers the original text where the operator is reversible.
//!
//! ## Architecture
//!
//! - [`anonymization`] - Engine, operators, registry, conflict resolution, rebuilder
//! - [`service`] - JSON request/response boundary
//! - [`cli`] - Command-line interface and argument parsing
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use shroud::anonymization::{AnonymizerEngine, EntitySpan, OperatorConfig, OperatorConfigs};
//!
//! # fn main() -> shroud::domain::Result<()> {
//! let engine = AnonymizerEngine::new()?;
//! let spans = vec![
//!     EntitySpan::new("PERSON", 5, 10, 0.85),
//!     EntitySpan::new("PHONE_NUMBER", 14, 26, 0.95),
//! ];
//! let configs = OperatorConfigs::new().with(
//!     "PHONE_NUMBER",
//!     OperatorConfig::new("mask")
//!         .with_param("masking_char", "*")
//!         .with_param("chars_to_mask", 4)
//!         .with_param("from_end", true),
//! );
//!
//! let result = engine.anonymize("Call Emily at 577-988-1234", &spans, &configs)?;
//! assert_eq!(result.text, "Call <PERSON> at 577-988-****");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library calls return [`domain::Result`], whose error is
//! [`domain::ShroudError`]. Every failure aborts the whole call; partial
//! results are never returned.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod service;
