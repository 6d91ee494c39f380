//! Anonymization module for Shroud
//!
//! This module replaces PII spans found by an external detector with
//! operator-generated text, and restores originals for reversible operators.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Registry**: built-in operators keyed by direction and name
//! - **Conflict resolution**: overlapping spans reduced to a disjoint set
//! - **Operators**: replace, redact, mask, hash, encrypt/decrypt, keep, genz
//! - **Rebuilder**: offset-exact splicing with new coordinates per item
//!
//! # Usage
//!
//! ```rust,ignore
//! use shroud::anonymization::{AnonymizerEngine, OperatorConfigs};
//!
//! let engine = AnonymizerEngine::new()?;
//! let result = engine.anonymize(text, &spans, &OperatorConfigs::new())?;
//! ```

pub mod conflict;
pub mod engine;
pub mod models;
pub mod operators;
pub mod rebuilder;
pub mod registry;

// Re-export main types
pub use conflict::resolve_conflicts;
pub use engine::AnonymizerEngine;
pub use models::{
    AnonymizedEntity, AnonymizerResult, DeanonymizeResult, EngineResult, EntitySpan,
    OperatorConfig, OperatorConfigs, OperatorParams, DEFAULT_ENTITY,
};
pub use operators::{Operator, OperatorInfo, OperatorType};
pub use registry::OperatorRegistry;
