//! Error-related types.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A validation error, returned when constructing a value from untrusted
/// input (a hostname, an EHLO parameter, ...) that turns out to violate a
/// syntactic invariant the type upholds by construction.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.kind)
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub(crate) enum ValidationErrorKind {
    #[error("must not be empty")]
    Empty,
    #[error("must not contain CR or LF")]
    ContainsEol,
    #[error("must be uppercase with no spaces, at most {max} bytes")]
    InvalidMechanismName { max: usize },
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }
}

pub(crate) fn reject_eol(s: &str) -> Result<(), ValidationError> {
    if s.contains('\r') || s.contains('\n') {
        return Err(ValidationError::new(ValidationErrorKind::ContainsEol));
    }
    Ok(())
}

pub(crate) fn reject_empty(s: &str) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::Empty));
    }
    Ok(())
}

pub(crate) fn invalid_mechanism_name(max: usize) -> ValidationError {
    ValidationError::new(ValidationErrorKind::InvalidMechanismName { max })
}
