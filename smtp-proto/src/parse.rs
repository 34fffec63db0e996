//! Response and command-line parsing.
//!
//! Replies are parsed one already-framed line at a time; multi-line
//! aggregation into a single [`Response`] is the caller's job
//! ([`ResponseDecoder`]). Command argument extraction (`MAIL FROM:<...>`,
//! `RCPT TO:<...>`) uses `nom` combinators rather than a regex engine.

use mailproto_core::ascii::b2s;
use mailproto_core::error::ProtocolError;
use nom::IResult;
use nom::bytes::complete::{tag_no_case, take_while};
use nom::character::complete::{char, multispace0};
use nom::combinator::opt;
use smtp_types::response::{EhloResponse, ReplyLine, Response};

/// Parse one reply line (with its CRLF/LF terminator already present) into
/// its code/finality/text parts.
///
/// `NNN text\r\n` is final, `NNN-text\r\n` is an intermediate continuation
/// line; anything else (bad separator, non-numeric or out-of-range code) is
/// a fatal framing-level violation.
pub fn parse_reply_line(line: &[u8]) -> Result<ReplyLine, ProtocolError> {
    let text = b2s(line).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))?;
    let text = mailproto_core::line::strip_terminator(text.as_bytes());
    let text = std::str::from_utf8(text).expect("ascii is valid utf8");

    if text.len() < 3 {
        return Err(ProtocolError::MalformedResponse(format!(
            "reply line too short: {text:?}"
        )));
    }
    let (code_str, rest) = text.split_at(3);
    let code: u16 = code_str
        .parse()
        .map_err(|_| ProtocolError::MalformedResponse(format!("non-numeric code: {code_str:?}")))?;
    if !(200..=599).contains(&code) {
        return Err(ProtocolError::MalformedResponse(format!(
            "code {code} out of range"
        )));
    }

    let (is_final, body) = match rest.chars().next() {
        None => (true, ""),
        Some(' ') => (true, &rest[1..]),
        Some('-') => (false, &rest[1..]),
        Some(other) => {
            return Err(ProtocolError::MalformedResponse(format!(
                "bad separator {other:?} after code"
            )));
        }
    };

    Ok(ReplyLine {
        code,
        is_final,
        text: body.to_string(),
    })
}

/// Accumulates [`ReplyLine`]s into a single aggregated [`Response`],
/// enforcing that every continuation line shares the first line's code.
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    code: Option<u16>,
    lines: Vec<String>,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one more framed wire line. Returns `Some(Response)` once a final
    /// line has been seen.
    pub fn feed(&mut self, line: &[u8]) -> Result<Option<Response>, ProtocolError> {
        let reply = parse_reply_line(line)?;
        match self.code {
            None => self.code = Some(reply.code),
            Some(code) if code == reply.code => {}
            Some(code) => {
                return Err(ProtocolError::MalformedResponse(format!(
                    "continuation code {} does not match leading code {code}",
                    reply.code
                )));
            }
        }
        self.lines.push(reply.text);
        if reply.is_final {
            let code = self.code.take().expect("set above");
            let lines = std::mem::take(&mut self.lines);
            Ok(Some(Response::new(code, lines)))
        } else {
            Ok(None)
        }
    }
}

/// Parse an aggregated EHLO reply: first line is the free-text greeting,
/// each subsequent line is either `AUTH <mech> ...` or `NAME [params]`.
pub fn parse_ehlo(response: Response) -> EhloResponse {
    let mut out = EhloResponse {
        code: response.code,
        greeting: String::new(),
        features: Default::default(),
        auth_mechanisms: Default::default(),
    };
    for (i, line) in response.lines.into_iter().enumerate() {
        if i == 0 {
            out.greeting = line;
            continue;
        }
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else { continue };
        if first.eq_ignore_ascii_case("AUTH") {
            out.auth_mechanisms
                .extend(words.map(|m| m.to_ascii_uppercase()));
        } else {
            let params = words.collect::<Vec<_>>().join(" ");
            out.features.insert(first.to_ascii_uppercase(), params);
        }
    }
    out
}

/// Split a command line into its uppercase verb word and the raw remainder
/// (not yet trimmed), e.g. `"MAIL FROM:<a@b>\r\n"` -> `("MAIL", "FROM:<a@b>")`.
pub fn split_verb(line: &str) -> (&str, &str) {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    }
}

/// `<?([^>]*)>?`: an optional leading `<`, everything up to `>` (or to the
/// end of input if there is no `>`), an optional trailing `>`.
fn address_angle_or_bare(input: &str) -> IResult<&str, &str> {
    let (input, _) = opt(char('<'))(input)?;
    let (input, addr) = take_while(|c| c != '>')(input)?;
    let (input, _) = opt(char('>'))(input)?;
    Ok((input, addr))
}

fn mail_like_address<'a>(keyword: &'static str, input: &'a str) -> IResult<&'a str, String> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag_no_case(keyword)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, addr) = address_angle_or_bare(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, addr.trim().to_string()))
}

/// `\s*FROM\s*:\s*<?([^>]*)>?\s*`, the `MAIL FROM` argument grammar.
pub fn parse_mail_from_address(argtext: &str) -> Option<String> {
    mail_like_address("FROM", argtext).ok().map(|(_, a)| a)
}

/// `\s*TO\s*:\s*<?([^>]*)>?\s*`, the `RCPT TO` argument grammar.
pub fn parse_rcpt_to_address(argtext: &str) -> Option<String> {
    mail_like_address("TO", argtext).ok().map(|(_, a)| a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_final_and_intermediate_lines() {
        let r = parse_reply_line(b"250 OK\r\n").unwrap();
        assert_eq!(r, ReplyLine { code: 250, is_final: true, text: "OK".into() });
        let r = parse_reply_line(b"250-PIPELINING\r\n").unwrap();
        assert_eq!(r.is_final, false);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_reply_line(b"abc text\r\n").is_err());
        assert!(parse_reply_line(b"999 text\r\n").is_err());
        assert!(parse_reply_line(b"250xOK\r\n").is_err());
    }

    #[test]
    fn decoder_aggregates_multiline_ehlo() {
        let mut dec = ResponseDecoder::new();
        assert!(dec.feed(b"250-bar.com Hello\r\n").unwrap().is_none());
        assert!(dec.feed(b"250-PIPELINING\r\n").unwrap().is_none());
        let resp = dec.feed(b"250 8BITMIME\r\n").unwrap().unwrap();
        assert_eq!(resp.code, 250);
        assert_eq!(resp.lines.len(), 3);
    }

    #[test]
    fn decoder_rejects_mismatched_continuation_code() {
        let mut dec = ResponseDecoder::new();
        dec.feed(b"250-a\r\n").unwrap();
        assert!(dec.feed(b"251 b\r\n").is_err());
    }

    #[test]
    fn splits_verb_and_argtext() {
        assert_eq!(split_verb("MAIL FROM:<a@b>\r\n"), ("MAIL", "FROM:<a@b>"));
        assert_eq!(split_verb("QUIT\r\n"), ("QUIT", ""));
        assert_eq!(split_verb("EHLO bar.com\r\n"), ("EHLO", "bar.com"));
    }

    #[test]
    fn extracts_mail_and_rcpt_addresses() {
        assert_eq!(
            parse_mail_from_address("FROM:<Smith@bar.com>").as_deref(),
            Some("Smith@bar.com")
        );
        assert_eq!(
            parse_rcpt_to_address("TO:<Jones@foo.com>").as_deref(),
            Some("Jones@foo.com")
        );
        assert_eq!(
            parse_mail_from_address("FROM: Smith@bar.com ").as_deref(),
            Some("Smith@bar.com")
        );
    }

}
