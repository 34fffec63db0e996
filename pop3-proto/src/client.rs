//! The client facade: one blocking method per verb, layered directly on the
//! transport since the client never has more than one request in flight.
//! Only `APOP` is wired up for authentication -- the original scaffolds a
//! `USER`/`PASS` request object but never gives it a working client path,
//! so neither is exposed here.

use std::collections::VecDeque;

use mailproto_core::line::LineFramer;
use mailproto_core::transport::Transport;
use mailproto_core::{ascii, Closed};

use crate::apop::apop_hash;
use pop3_types::response::{CapaResponse, ErrorResponse, GreetingResponse, Response, StatResponse, SuccessResponse};

/// Any outcome of a client request: a transport/framing failure closes the
/// connection; a peer `-ERR` reply is returned to the caller without
/// closing it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Closed(#[from] Closed),
    #[error(transparent)]
    Rejected(#[from] ErrorResponse),
}

pub struct Client<T> {
    transport: T,
    framer: LineFramer,
    pending: VecDeque<Vec<u8>>,
    pub tls: bool,
}

impl<T> Client<T>
where
    T: Transport,
    T::Error: std::fmt::Display,
{
    pub fn new(transport: T) -> Self {
        Self { transport, framer: LineFramer::new(), pending: VecDeque::new(), tls: false }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn send_line(&mut self, line: &str) -> Result<(), ClientError> {
        let bytes = ascii::s2b(line).map_err(|e| Closed::new(e.to_string()))?;
        self.transport
            .write(&bytes)
            .map_err(|e| Closed::new(format!("write failed: {e}")))?;
        Ok(())
    }

    fn next_line(&mut self) -> Result<Vec<u8>, ClientError> {
        while self.pending.is_empty() {
            let chunk = self
                .transport
                .read()
                .map_err(|e| Closed::new(format!("read failed: {e}")))?;
            if chunk.is_empty() {
                return Err(Closed::eof().into());
            }
            let lines = self.framer.receive(&chunk)?;
            self.pending.extend(lines);
        }
        Ok(self.pending.pop_front().expect("checked non-empty"))
    }

    /// Parse one already-framed reply line into `(ok, text)`.
    fn parse_line(line: &[u8]) -> Result<(bool, String), Closed> {
        let text = ascii::b2s(line).map_err(|e| Closed::new(e.to_string()))?;
        let text = mailproto_core::line::strip_terminator(text.as_bytes());
        let text = std::str::from_utf8(text).expect("ascii is valid utf8");
        let (tag, rest) = match text.split_once(' ') {
            Some((tag, rest)) => (tag, rest),
            None => (text, ""),
        };
        match tag {
            "+OK" => Ok((true, rest.to_string())),
            "-ERR" => Ok((false, rest.to_string())),
            _ => Err(Closed::new(format!("malformed response from server: {text:?}"))),
        }
    }

    /// Read a single-line `+OK`/`-ERR` reply.
    fn read_single(&mut self) -> Result<Response, ClientError> {
        let line = self.next_line()?;
        let (ok, message) = Self::parse_line(&line)?;
        Ok(Response::single(ok, message))
    }

    /// Read a reply that, on success, is dot-terminated and multi-line.
    fn read_multi(&mut self) -> Result<Response, ClientError> {
        let line = self.next_line()?;
        let (ok, message) = Self::parse_line(&line)?;
        if !ok {
            return Ok(Response::single(false, message));
        }
        let mut lines = Vec::new();
        loop {
            let line = self.next_line()?;
            if line == b".\r\n" || line == b".\n" {
                break;
            }
            let text = ascii::b2s(&line).map_err(|e| Closed::new(e.to_string()))?;
            let text = mailproto_core::line::strip_terminator(text.as_bytes());
            let text = std::str::from_utf8(text).expect("ascii is valid utf8");
            let text = text.strip_prefix('.').unwrap_or(text);
            lines.push(text.to_string());
        }
        Ok(Response::multi(true, message, lines))
    }

    fn read_ok(&mut self) -> Result<SuccessResponse, ClientError> {
        Ok(self.read_single()?.into_result()?)
    }

    fn send_recv_ok(&mut self, line: &str) -> Result<SuccessResponse, ClientError> {
        self.send_line(line)?;
        self.read_ok()
    }

    pub fn read_greeting(&mut self) -> Result<GreetingResponse, ClientError> {
        let response = self.read_single()?.into_result()?;
        Ok(GreetingResponse::parse(response.message))
    }

    pub fn capa(&mut self) -> Result<CapaResponse, ClientError> {
        self.send_line("CAPA\r\n")?;
        let response = self.read_multi()?.into_result()?;
        Ok(CapaResponse::from_lines(response.message, response.lines))
    }

    /// Issue `STLS` and perform the handshake. Unlike SMTP's `STARTTLS`,
    /// the server does not re-greet afterwards, so there is no follow-up
    /// reply to read.
    pub fn stls(&mut self, server_hostname: &str) -> Result<SuccessResponse, ClientError> {
        let go_ahead = self.send_recv_ok("STLS\r\n")?;
        self.transport
            .starttls_client(server_hostname)
            .map_err(|e| Closed::new(format!("STLS handshake failed: {e}")))?;
        self.tls = true;
        self.framer = LineFramer::new();
        Ok(go_ahead)
    }

    /// `APOP <uid> <digest>`, where `digest = md5_hex(challenge + pwd)`
    /// over the challenge embedded in the greeting (RFC 1939 §7).
    pub fn apop(&mut self, uid: &str, pwd: &str, greeting: &GreetingResponse) -> Result<SuccessResponse, ClientError> {
        let challenge = greeting
            .apop_challenge
            .as_deref()
            .ok_or_else(|| Closed::new("server did not offer an APOP challenge"))?;
        let digest = apop_hash(challenge, pwd);
        self.send_recv_ok(&format!("APOP {uid} {digest}\r\n"))
    }

    /// `STAT` (RFC 1939 §5): maildrop message count and total size.
    pub fn stat(&mut self) -> Result<StatResponse, ClientError> {
        let response = self.send_recv_ok("STAT\r\n")?;
        StatResponse::parse(&response.message)
            .ok_or_else(|| Closed::new(format!("malformed STAT reply: {:?}", response.message)).into())
    }

    pub fn rset(&mut self) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok("RSET\r\n")
    }

    pub fn noop(&mut self) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok("NOOP\r\n")
    }

    pub fn quit(&mut self) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok("QUIT\r\n")
    }
}
