//! Parsed SMTP replies.
//!
//! A reply is a 3-digit code followed by one or more lines; `NNN-text`
//! continuation lines are aggregated with the final `NNN text` line into a
//! single [`Response`] before it ever reaches caller code — multi-line
//! aggregation happens in `smtp-proto`'s decoder, not here.

use std::collections::{BTreeMap, BTreeSet};

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A fully aggregated SMTP reply: one numeric code, one or more text lines.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub code: u16,
    pub lines: Vec<String>,
}

impl Response {
    pub fn new(code: u16, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    pub fn is_success(&self) -> bool {
        self.code < 400
    }

    /// Split into the success/error halves the client facade deals in.
    pub fn into_result(self) -> Result<SuccessResponse, ErrorResponse> {
        if self.is_success() {
            Ok(SuccessResponse {
                code: self.code,
                lines: self.lines,
            })
        } else {
            Err(ErrorResponse {
                code: self.code,
                lines: self.lines,
            })
        }
    }
}

/// A reply with `code < 400`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub code: u16,
    pub lines: Vec<String>,
}

/// A reply with `code` in `400..=599`. Implements [`std::error::Error`] so
/// it can be returned from client facade methods with `?`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ErrorResponse {
    pub code: u16,
    pub lines: Vec<String>,
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.lines.join(" "))
    }
}

impl ErrorResponse {
    pub fn single(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            lines: vec![message.into()],
        }
    }
}

/// A single `NNN-text` or `NNN text` reply line before aggregation, used
/// internally by the decoder to tell continuation from finality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyLine {
    pub code: u16,
    pub is_final: bool,
    pub text: String,
}

/// The parsed EHLO multi-line reply: the greeting line, the feature map
/// (feature name -> parameter text, empty string if the feature takes no
/// parameters), and the set of AUTH mechanisms advertised on the `AUTH`
/// feature line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EhloResponse {
    pub code: u16,
    pub greeting: String,
    pub features: BTreeMap<String, String>,
    pub auth_mechanisms: BTreeSet<String>,
}

/// `EXPN`/`VRFY` success: the mailbox names returned as continuation lines.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailboxListResponse {
    pub code: u16,
    pub mailboxes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_success_and_error() {
        assert!(Response::new(250, vec!["OK".into()]).is_success());
        assert!(!Response::new(550, vec!["No such user here".into()]).is_success());
    }

    #[test]
    fn into_result_splits_on_code() {
        assert!(Response::new(221, vec!["bye".into()]).into_result().is_ok());
        assert!(Response::new(421, vec!["busy".into()]).into_result().is_err());
    }
}
