//! Redacting wrapper for secrets
//!
//! OAuth client secrets and auth codes travel inside `Sensitive<T>` so a
//! stray `{:?}` in a log line never prints them.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// ```
/// use signage_core_types::Sensitive;
///
/// let secret = Sensitive::new("s3cr3t");
/// assert_eq!(format!("{:?}", secret), "***REDACTED***");
/// assert_eq!(secret.expose(), &"s3cr3t");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value (e.g. to bind it into an INSERT)
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
