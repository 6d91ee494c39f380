//! Result type alias for Shroud

use super::errors::ShroudError;

/// Result type alias for Shroud operations
///
/// # Examples
///
/// ```
/// use shroud::domain::result::Result;
/// use shroud::domain::errors::ShroudError;
///
/// fn failing_function() -> Result<()> {
///     Err(ShroudError::InvalidParam("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShroudError>;
