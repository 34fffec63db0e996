//! Encoding a [`Response`] back into wire bytes, and the EHLO
//! `AUTH <mech> <mech> ...` continuation-line folding helper.

use smtp_types::response::Response;

/// `NNN-text\r\n` for every line but the last, `NNN text\r\n` for the last.
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut out = Vec::new();
    let last = response.lines.len().saturating_sub(1);
    let lines = if response.lines.is_empty() {
        vec![String::new()]
    } else {
        response.lines.clone()
    };
    for (i, line) in lines.iter().enumerate() {
        let sep = if i == last { ' ' } else { '-' };
        out.extend_from_slice(format!("{}{}{}\r\n", response.code, sep, line).as_bytes());
    }
    out
}

/// Fold a set of AUTH mechanism names into one or more `AUTH ...`
/// continuation lines, none exceeding 71 characters of mechanism-name text
/// (`smtp_types::auth::MAX_MECHANISM_NAME_LEN`'s budget, applied across a
/// whole line the way the original wraps at the same width).
pub fn fold_auth_mechanisms(mechanisms: &std::collections::BTreeSet<String>) -> Vec<String> {
    const WIDTH: usize = 71;
    if mechanisms.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::from("AUTH");
    for mech in mechanisms {
        if current.len() + 1 + mech.len() > WIDTH && current != "AUTH" {
            lines.push(current);
            current = String::from("AUTH");
        }
        current.push(' ');
        current.push_str(mech);
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_and_multi_line_response() {
        assert_eq!(
            encode_response(&Response::new(250, vec!["OK".into()])),
            b"250 OK\r\n"
        );
        assert_eq!(
            encode_response(&Response::new(
                250,
                vec!["bar.com".into(), "PIPELINING".into(), "8BITMIME".into()]
            )),
            b"250-bar.com\r\n250-PIPELINING\r\n250 8BITMIME\r\n"
        );
    }

    #[test]
    fn folds_auth_mechanisms_within_width() {
        let mut set = std::collections::BTreeSet::new();
        set.insert("PLAIN".to_string());
        set.insert("LOGIN".to_string());
        let lines = fold_auth_mechanisms(&set);
        assert_eq!(lines, vec!["AUTH LOGIN PLAIN".to_string()]);
        for line in &lines {
            assert!(line.len() <= 71);
        }
    }
}
