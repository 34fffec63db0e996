//! Encoding a [`Response`] back into wire bytes: a single `+OK`/`-ERR` line,
//! or (for multi-line bodies such as `CAPA`) the leading line followed by
//! one entry per line and a lone `.` terminator, dot-stuffed the way
//! [`mailproto_core::stuffing`] stuffs `DATA` bodies.

use pop3_types::response::Response;

pub fn encode_response(response: &Response) -> Vec<u8> {
    let tag = if response.ok { "+OK" } else { "-ERR" };
    let mut out = Vec::new();
    if response.message.is_empty() {
        out.extend_from_slice(format!("{tag}\r\n").as_bytes());
    } else {
        out.extend_from_slice(format!("{tag} {}\r\n", response.message).as_bytes());
    }
    for line in &response.lines {
        let stuffed = if line.starts_with('.') { format!(".{line}") } else { line.clone() };
        out.extend_from_slice(format!("{stuffed}\r\n").as_bytes());
    }
    if !response.lines.is_empty() {
        out.extend_from_slice(b".\r\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_line() {
        assert_eq!(encode_response(&Response::single(true, "ready")), b"+OK ready\r\n");
        assert_eq!(encode_response(&Response::single(false, "nope")), b"-ERR nope\r\n");
    }

    #[test]
    fn encodes_multi_line_with_dot_terminator() {
        let bytes = encode_response(&Response::multi(
            true,
            "Capability list follows",
            vec!["STLS".to_string(), "UIDL".to_string()],
        ));
        assert_eq!(bytes, b"+OK Capability list follows\r\nSTLS\r\nUIDL\r\n.\r\n");
    }

    #[test]
    fn stuffs_body_lines_starting_with_a_dot() {
        let bytes = encode_response(&Response::multi(true, "ok", vec![".leading".to_string()]));
        assert_eq!(bytes, b"+OK ok\r\n..leading\r\n.\r\n");
    }
}
