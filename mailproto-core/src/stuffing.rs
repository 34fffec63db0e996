//! Dot-stuffing: the escaping convention shared by SMTP `DATA` bodies (RFC
//! 5321 §4.5.2) and POP3's dot-terminated multi-line responses (`CAPA`,
//! `LIST`, `UIDL`, ...). A line consisting of a single `.` unambiguously
//! ends the body; any line that would otherwise start with `.` gets an
//! extra leading dot on the wire.

/// Stuff `payload` for transmission as a complete dot-terminated body:
/// double every leading dot that follows a CRLF, ensure a trailing CRLF,
/// then append the `.\r\n` terminator.
pub fn stuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    let mut i = 0;
    while i < payload.len() {
        if payload[i..].starts_with(b"\r\n.") {
            out.extend_from_slice(b"\r\n..");
            i += 3;
        } else {
            out.push(payload[i]);
            i += 1;
        }
    }
    if !out.ends_with(b"\r\n") {
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b".\r\n");
    out
}

/// Outcome of examining one already-framed line of an inbound dot-terminated
/// body.
pub enum BodyLine<'a> {
    /// An ordinary body line, with any leading dot removed.
    Data(std::borrow::Cow<'a, [u8]>),
    /// The `.` terminator line: the body is complete.
    Terminator,
}

/// De-stuff one inbound line. `line` must include its terminating CRLF (or
/// bare LF), as produced by [`crate::line::LineFramer`].
pub fn destuff_line(line: &[u8]) -> BodyLine<'_> {
    if line == b".\r\n" || line == b".\n" {
        return BodyLine::Terminator;
    }
    if let Some(rest) = line.strip_prefix(b".") {
        BodyLine::Data(std::borrow::Cow::Borrowed(rest))
    } else {
        BodyLine::Data(std::borrow::Cow::Borrowed(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuffs_and_terminates() {
        let payload = b"Blah\r\n.<<< Evil\r\nLast\r\n.";
        let wire = stuff(payload);
        assert_eq!(&wire, b"Blah\r\n..<<< Evil\r\nLast\r\n..\r\n.\r\n");
    }

    #[test]
    fn destuffing_recovers_original_lines() {
        let wire = stuff(b"Blah\r\n.<<< Evil\r\nLast\r\n.");
        let mut framer = crate::line::LineFramer::new();
        let lines = framer.receive(&wire).unwrap();
        let mut recovered = Vec::new();
        for line in &lines {
            match destuff_line(line) {
                BodyLine::Data(data) => recovered.push(data.into_owned()),
                BodyLine::Terminator => break,
            }
        }
        assert_eq!(
            recovered,
            vec![
                b"Blah\r\n".to_vec(),
                b".<<< Evil\r\n".to_vec(),
                b"Last\r\n".to_vec(),
                b".\r\n".to_vec(),
            ]
        );
    }

    #[test]
    fn empty_payload_is_just_the_terminator() {
        assert_eq!(stuff(b""), b".\r\n");
    }
}
