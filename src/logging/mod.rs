//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use shroud::logging::init_logging;
//! use shroud::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config)?;
//!
//! tracing::info!("Application started");
//! # Ok::<(), shroud::domain::ShroudError>(())
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a request that completed
///
/// # Example
///
/// ```no_run
/// use shroud::log_request_complete;
///
/// log_request_complete!("anonymize", 2);
/// ```
#[macro_export]
macro_rules! log_request_complete {
    ($operation:expr, $items:expr) => {
        tracing::info!(
            operation = $operation,
            items = $items,
            "Request completed"
        );
    };
}

/// Log a request refused because of the caller's input or configuration
///
/// # Example
///
/// ```no_run
/// use shroud::log_request_rejected;
/// use shroud::domain::ShroudError;
///
/// let error = ShroudError::InvalidParam("Invalid parameter value for key.".to_string());
/// log_request_rejected!("anonymize", &error);
/// ```
#[macro_export]
macro_rules! log_request_rejected {
    ($operation:expr, $error:expr) => {
        tracing::warn!(
            operation = $operation,
            status = $error.status_code(),
            error = %$error,
            "Request rejected"
        );
    };
}

/// Log a request that failed for an internal reason
///
/// The full error is logged; callers only ever see a generic message.
#[macro_export]
macro_rules! log_request_failed {
    ($operation:expr, $error:expr) => {
        tracing::error!(
            operation = $operation,
            error = %$error,
            "Request failed"
        );
    };
}
