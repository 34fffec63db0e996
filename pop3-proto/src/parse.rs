//! Command-line parsing for POP3's verb table.

use mailproto_core::ascii::b2s;
use mailproto_core::error::ProtocolError;
use nom::IResult;
use nom::bytes::complete::{take, take_while1};
use nom::character::complete::multispace0;

/// Split a command line into its uppercase verb word and the raw remainder
/// (not yet trimmed), e.g. `"APOP mrose c4c9...\r\n"` ->
/// `("APOP", "mrose c4c9...")`.
pub fn split_verb(line: &[u8]) -> Result<(String, String), ProtocolError> {
    let text = b2s(line).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))?;
    let text = mailproto_core::line::strip_terminator(text.as_bytes());
    let text = std::str::from_utf8(text).expect("ascii is valid utf8");
    match text.find(char::is_whitespace) {
        Some(idx) => Ok((text[..idx].to_ascii_uppercase(), text[idx..].trim_start().to_string())),
        None => Ok((text.to_ascii_uppercase(), String::new())),
    }
}

/// The 32-hex-digit digest plus mailbox id out of an `APOP` command's
/// argument text: `\s*([^\s]+)\s*([^\s]+)\s*`.
pub fn parse_apop_args(argtext: &str) -> Option<(String, String)> {
    fn hex32(input: &str) -> IResult<&str, &str> {
        let (input, digest) = take(32usize)(input)?;
        if !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::HexDigit,
            )));
        }
        Ok((input, digest))
    }
    fn parser(input: &str) -> IResult<&str, (&str, &str)> {
        let (input, uid) = take_while1(|c: char| !c.is_whitespace())(input)?;
        let (input, _) = multispace0(input)?;
        let (input, digest) = hex32(input)?;
        let (input, _) = multispace0(input)?;
        if !input.is_empty() {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Eof,
            )));
        }
        Ok((input, (uid, digest)))
    }
    parser(argtext.trim()).ok().map(|(_, (uid, digest))| (uid.to_string(), digest.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_verb_and_argtext() {
        assert_eq!(
            split_verb(b"apop mrose abc\r\n").unwrap(),
            ("APOP".to_string(), "mrose abc".to_string())
        );
        assert_eq!(split_verb(b"QUIT\r\n").unwrap(), ("QUIT".to_string(), String::new()));
    }

    #[test]
    fn extracts_apop_args() {
        let (uid, digest) = parse_apop_args("mrose c4c9334bac560ecc979e58001b3e22fb").unwrap();
        assert_eq!(uid, "mrose");
        assert_eq!(digest, "c4c9334bac560ecc979e58001b3e22fb");
    }

    #[test]
    fn rejects_malformed_apop_args() {
        assert!(parse_apop_args("mrose tooshort").is_none());
        assert!(parse_apop_args("onlyoneword").is_none());
    }
}
