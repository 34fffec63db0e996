//! Parsed POP3 replies.
//!
//! Single-line replies are `+OK`/`-ERR` plus text; multi-line bodies
//! (`CAPA`, and historically `LIST`/`UIDL`) are dot-terminated, with the
//! leading `+OK text` line followed by one line per entry and a lone `.`
//! terminator. Aggregation happens in `pop3-proto`'s decoder; this crate
//! only holds the aggregated shape.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A fully aggregated POP3 reply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub ok: bool,
    pub message: String,
    /// Populated for multi-line (dot-terminated) bodies; empty for a plain
    /// single-line reply.
    pub lines: Vec<String>,
}

impl Response {
    pub fn single(ok: bool, message: impl Into<String>) -> Self {
        Self { ok, message: message.into(), lines: Vec::new() }
    }

    pub fn multi(ok: bool, message: impl Into<String>, lines: Vec<String>) -> Self {
        Self { ok, message: message.into(), lines }
    }

    pub fn into_result(self) -> Result<SuccessResponse, ErrorResponse> {
        if self.ok {
            Ok(SuccessResponse { message: self.message, lines: self.lines })
        } else {
            Err(ErrorResponse { message: self.message })
        }
    }
}

/// A `+OK` reply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub message: String,
    pub lines: Vec<String>,
}

/// A `-ERR` reply. Implements [`std::error::Error`] so it can be returned
/// from client facade methods with `?`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ErrorResponse {
    pub message: String,
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "-ERR {}", self.message)
    }
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The greeting's `+OK` text, with its embedded `<...>` APOP challenge (if
/// any) pulled out separately.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingResponse {
    pub message: String,
    pub apop_challenge: Option<String>,
}

impl GreetingResponse {
    pub fn parse(message: String) -> Self {
        let apop_challenge = extract_angle_token(&message);
        Self { message, apop_challenge }
    }
}

/// Find the first `<...>` substring in `text`, the message-id-shaped token
/// an APOP challenge takes.
fn extract_angle_token(text: &str) -> Option<String> {
    let start = text.find('<')?;
    let end = text[start..].find('>')? + start;
    Some(text[start..=end].to_string())
}

/// `STAT` (RFC 1939 §5): maildrop message count and total size, parsed out
/// of the `+OK {count} {octets}` success text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatResponse {
    pub count: u32,
    pub octets: u64,
}

impl StatResponse {
    pub fn parse(message: &str) -> Option<Self> {
        let mut words = message.split_whitespace();
        let count = words.next()?.parse().ok()?;
        let octets = words.next()?.parse().ok()?;
        Some(Self { count, octets })
    }
}

/// `CAPA` (RFC 2449): the capability name -> parameter text map, parsed out
/// of the dot-terminated body.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapaResponse {
    pub message: String,
    pub capabilities: BTreeMap<String, String>,
}

impl CapaResponse {
    pub fn from_lines(message: String, lines: Vec<String>) -> Self {
        let mut capabilities = BTreeMap::new();
        for line in lines {
            let mut words = line.splitn(2, ' ');
            let Some(name) = words.next() else { continue };
            if name.is_empty() {
                continue;
            }
            let params = words.next().unwrap_or("").to_string();
            capabilities.insert(name.to_ascii_uppercase(), params);
        }
        Self { message, capabilities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_success_and_error() {
        assert!(Response::single(true, "ready").into_result().is_ok());
        assert!(Response::single(false, "nope").into_result().is_err());
    }

    #[test]
    fn greeting_extracts_apop_challenge() {
        let greeting = GreetingResponse::parse(
            "POP3 server ready <1896.697170952@dbc.mtview.ca.us>".to_string(),
        );
        assert_eq!(
            greeting.apop_challenge.as_deref(),
            Some("<1896.697170952@dbc.mtview.ca.us>")
        );
    }

    #[test]
    fn greeting_without_challenge_is_none() {
        let greeting = GreetingResponse::parse("POP3 server ready".to_string());
        assert_eq!(greeting.apop_challenge, None);
    }

    #[test]
    fn capa_response_builds_capability_map() {
        let capa = CapaResponse::from_lines(
            "Capability list follows".to_string(),
            vec!["STLS".to_string(), "UIDL".to_string(), "SASL PLAIN LOGIN".to_string()],
        );
        assert_eq!(capa.capabilities.get("STLS"), Some(&String::new()));
        assert_eq!(capa.capabilities.get("SASL"), Some(&"PLAIN LOGIN".to_string()));
    }

    #[test]
    fn stat_parses_count_and_octets() {
        assert_eq!(StatResponse::parse("2 320"), Some(StatResponse { count: 2, octets: 320 }));
    }

    #[test]
    fn stat_rejects_malformed_text() {
        assert_eq!(StatResponse::parse("not a stat"), None);
    }
}
