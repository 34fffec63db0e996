//! AUTH mechanism names and credentials (RFC 4954).

use std::fmt::{Display, Formatter};

use crate::error::{ValidationError, invalid_mechanism_name};
use crate::secret::Secret;

/// The maximum length of a registered mechanism name, carried over from the
/// 71-character EHLO continuation-line wrapping budget (`fold_auth_mechanisms`).
pub const MAX_MECHANISM_NAME_LEN: usize = 71;

/// A validated AUTH mechanism name: uppercase, no spaces, at most
/// [`MAX_MECHANISM_NAME_LEN`] bytes. The registry in `smtp-proto` is keyed by
/// this type rather than a bare `&str` so a mistyped or lowercased
/// registration fails at construction instead of silently never matching.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthMechanismName(String);

impl AuthMechanismName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for AuthMechanismName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let valid = !value.is_empty()
            && value.len() <= MAX_MECHANISM_NAME_LEN
            && !value.contains(' ')
            && value.chars().all(|c| !c.is_ascii_lowercase());
        if !valid {
            return Err(invalid_mechanism_name(MAX_MECHANISM_NAME_LEN));
        }
        Ok(Self(value.to_string()))
    }
}

impl Display for AuthMechanismName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two built-in mechanisms this implementation ships plugins for. Other
/// names may still be registered by a host; this enum is a convenience for
/// the two the core recognizes out of the box.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMechanism {
    Plain,
    Login,
}

impl BuiltinMechanism {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinMechanism::Plain => "PLAIN",
            BuiltinMechanism::Login => "LOGIN",
        }
    }
}

/// Credentials surfaced to the host via [`crate::event::AuthArgs`] once an
/// AUTH mechanism plugin has completed its challenge/response exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub uid: String,
    pub pwd: Secret<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("uid", &self.uid)
            .field("pwd", &self.pwd)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        assert!(AuthMechanismName::try_from("PLAIN").is_ok());
        assert!(AuthMechanismName::try_from("SCRAM-SHA-1").is_ok());
    }

    #[test]
    fn rejects_lowercase_spaces_and_overlong_names() {
        assert!(AuthMechanismName::try_from("plain").is_err());
        assert!(AuthMechanismName::try_from("PLAIN TEXT").is_err());
        assert!(AuthMechanismName::try_from("").is_err());
        let long = "A".repeat(MAX_MECHANISM_NAME_LEN + 1);
        assert!(AuthMechanismName::try_from(long.as_str()).is_err());
    }
}
