use thiserror::Error;

/// The connection is finished; no further bytes should be read or written.
///
/// Raised for both normal termination (`QUIT`) and fatal conditions (framing
/// violations, transport failures, internal logic errors). Carries a short
/// human-readable reason for logging; it is not meant to be parsed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("connection closed: {reason}")]
pub struct Closed {
    pub reason: String,
}

impl Closed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new("EOF")
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL ERROR")
    }
}

/// A non-recoverable wire-level violation: an over-long line, or bytes that
/// cannot be framed at all. Always converted to [`Closed`] by the driver.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("maximum line length of {max} bytes exceeded")]
    LineTooLong { max: usize },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<ProtocolError> for Closed {
    fn from(e: ProtocolError) -> Self {
        Closed::new(e.to_string())
    }
}
