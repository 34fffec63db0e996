//! CRLF line framing.
//!
//! Turns a stream of byte chunks into a stream of lines. A line is bytes
//! terminated by `\n`; the terminator (and any preceding `\r`) is kept in the
//! emitted line, mirroring the wire bytes exactly so the caller can re-derive
//! the raw input by concatenation.

use crate::error::ProtocolError;

/// Maximum line length, inclusive of the terminator. RFC 5321 and RFC 1939
/// both bound command/response lines well under this; it exists only to
/// bound memory use against a peer that never sends a terminator.
pub const MAXLINE: usize = 8192;

/// Accumulates bytes and splits them into CRLF- (or bare-LF-) terminated
/// lines.
///
/// `receive` is fed chunks as they arrive from the transport; an empty chunk
/// signals EOF. It returns the lines completed by the new bytes, in order.
/// A non-empty residue is kept internally across calls.
#[derive(Debug, Default, Clone)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `data` into the framer. Pass an empty slice to signal EOF.
    ///
    /// On EOF: if the internal buffer holds residual unterminated bytes,
    /// they are returned as one final "line" (without a terminator); if the
    /// buffer is empty, `Ok(None)` is returned to tell the caller that EOF
    /// was clean (no pending data), matching `Closed::eof()` at the driver
    /// layer.
    pub fn receive(&mut self, data: &[u8]) -> Result<Vec<Vec<u8>>, ProtocolError> {
        if data.is_empty() {
            if self.buf.is_empty() {
                return Ok(Vec::new());
            }
            let residue = std::mem::take(&mut self.buf);
            return Ok(vec![residue]);
        }

        self.buf.extend_from_slice(data);

        let mut lines = Vec::new();
        let mut start = 0usize;
        while let Some(pos) = memchr(b'\n', &self.buf[start..]) {
            let end = start + pos + 1;
            lines.push(self.buf[start..end].to_vec());
            start = end;
        }
        if start > 0 {
            self.buf.drain(..start);
        }

        if self.buf.len() >= MAXLINE {
            return Err(ProtocolError::LineTooLong { max: MAXLINE });
        }

        Ok(lines)
    }

    /// True once EOF has drained all residue and nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

fn memchr(needle: u8, haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Strips a single trailing `\r\n` or bare `\n` from `line`.
pub fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_multiple_lines_in_one_chunk() {
        let mut framer = LineFramer::new();
        let lines = framer.receive(b"EHLO a\r\nMAIL FROM:<x>\r\n").unwrap();
        assert_eq!(lines, vec![b"EHLO a\r\n".to_vec(), b"MAIL FROM:<x>\r\n".to_vec()]);
    }

    #[test]
    fn holds_partial_line_across_chunks() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.receive(b"EHLO a").unwrap(), Vec::<Vec<u8>>::new());
        assert_eq!(framer.receive(b"\r\n").unwrap(), vec![b"EHLO a\r\n".to_vec()]);
    }

    #[test]
    fn accepts_bare_lf() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.receive(b"NOOP\n").unwrap(), vec![b"NOOP\n".to_vec()]);
    }

    #[test]
    fn eof_with_residue_emits_final_line() {
        let mut framer = LineFramer::new();
        framer.receive(b"QUIT").unwrap();
        assert_eq!(framer.receive(b"").unwrap(), vec![b"QUIT".to_vec()]);
    }

    #[test]
    fn eof_with_empty_buffer_emits_nothing() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.receive(b"").unwrap(), Vec::<Vec<u8>>::new());
    }

    #[test]
    fn overlong_unterminated_line_is_fatal() {
        let mut framer = LineFramer::new();
        let chunk = vec![b'a'; MAXLINE];
        assert!(matches!(
            framer.receive(&chunk),
            Err(ProtocolError::LineTooLong { max: MAXLINE })
        ));
    }

    #[test]
    fn strip_terminator_handles_both_forms() {
        assert_eq!(strip_terminator(b"abc\r\n"), b"abc");
        assert_eq!(strip_terminator(b"abc\n"), b"abc");
        assert_eq!(strip_terminator(b"abc"), b"abc");
    }
}
