//! Strict US-ASCII text/byte conversion.
//!
//! SMTP and POP3 command/response text is US-ASCII; both the original
//! `b2s`/`s2b` helpers and this port reject anything outside that range
//! rather than silently lossy-converting it.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("non-ASCII byte {byte:#04x} at offset {offset}")]
pub struct NotAscii {
    pub offset: usize,
    pub byte: u8,
}

/// Decode `bytes` as strict US-ASCII.
pub fn b2s(bytes: &[u8]) -> Result<&str, NotAscii> {
    if let Some(offset) = bytes.iter().position(|&b| !b.is_ascii()) {
        return Err(NotAscii {
            offset,
            byte: bytes[offset],
        });
    }
    // SAFETY: every byte was just checked to be < 0x80.
    Ok(std::str::from_utf8(bytes).expect("validated ASCII is valid UTF-8"))
}

/// Encode `s` as strict US-ASCII bytes.
pub fn s2b(s: &str) -> Result<Vec<u8>, NotAscii> {
    if let Some(offset) = s.bytes().position(|b| !b.is_ascii()) {
        return Err(NotAscii {
            offset,
            byte: s.as_bytes()[offset],
        });
    }
    Ok(s.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_ascii() {
        assert_eq!(b2s(b"HELO bar.com\r\n").unwrap(), "HELO bar.com\r\n");
        assert_eq!(s2b("HELO bar.com\r\n").unwrap(), b"HELO bar.com\r\n");
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(b2s("café".as_bytes()).is_err());
        assert!(s2b("café").is_err());
    }
}
