//! Result type alias for Coupe
//!
//! This module provides a convenient Result type alias that uses CoupeError
//! as the error type.

use super::errors::CoupeError;

/// Result type alias for Coupe operations
///
/// # Examples
///
/// ```
/// use coupe::domain::result::Result;
/// use coupe::domain::errors::CoupeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CoupeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CoupeError>;
