//! Domain error and result types for Shroud.
//!
//! All fallible library operations return [`Result<T>`], an alias over
//! [`ShroudError`]:
//!
//! ```rust
//! use shroud::domain::{Result, ShroudError};
//!
//! fn check(start: usize, end: usize) -> Result<()> {
//!     if start >= end {
//!         return Err(ShroudError::InvalidSpan(format!("start {start} >= end {end}")));
//!     }
//!     Ok(())
//! }
//! # assert!(check(3, 1).is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::ShroudError;
pub use result::Result;
