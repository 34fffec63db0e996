//! Handling of secret values.
//!
//! Provides a `Secret<T>` ensuring that AUTH credentials (uid/pwd) are not
//! `Debug`-printed by accident when a request or event carrying them is
//! logged.

use std::fmt::{Debug, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A wrapper that redacts its contents during `Debug`-printing.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Expose the inner secret.
    pub fn declassify(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Debug for Secret<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        #[cfg(not(debug_assertions))]
        return write!(f, "/* REDACTED */");
        #[cfg(debug_assertions)]
        return self.0.fmt(f);
    }
}

#[cfg(test)]
mod tests {
    use super::Secret;

    #[test]
    #[cfg(not(debug_assertions))]
    fn secret_is_redacted_in_release_builds() {
        let secret = Secret::new("hunter2");
        let got = format!("{:?}", secret);
        assert!(!got.contains("hunter2"));
        assert!(got.contains("REDACTED"));
    }

    #[test]
    fn secret_equality_ignores_debug_formatting() {
        assert_eq!(Secret::new("a"), Secret::new("a"));
        assert_ne!(Secret::new("a"), Secret::new("b"));
    }
}
