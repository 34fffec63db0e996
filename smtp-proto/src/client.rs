//! The client facade: one blocking method per verb, layered directly on
//! the transport since the client never has more than one request in
//! flight.

use std::collections::VecDeque;

use mailproto_core::line::LineFramer;
use mailproto_core::stuffing::stuff;
use mailproto_core::transport::Transport;
use mailproto_core::{ascii, base64, Closed};
use smtp_types::auth::Credentials;
use smtp_types::response::{EhloResponse, ErrorResponse, MailboxListResponse, Response, SuccessResponse};
use smtp_types::secret::Secret;

use crate::parse::{ResponseDecoder, parse_ehlo};
use crate::verbs::mechanisms::login;

/// Any outcome of a client request: a transport/framing failure closes the
/// connection; a peer error reply is returned to the caller without
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
        Self {
            transport,
            framer: LineFramer::new(),
            pending: VecDeque::new(),
            tls: false,
        }
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

    fn read_response(&mut self) -> Result<Response, ClientError> {
        let mut decoder = ResponseDecoder::new();
        loop {
            let line = self.next_line()?;
            if let Some(response) = decoder.feed(&line)? {
                return Ok(response);
            }
        }
    }

    fn read_ok(&mut self) -> Result<SuccessResponse, ClientError> {
        Ok(self.read_response()?.into_result()?)
    }

    fn send_recv_ok(&mut self, line: &str) -> Result<SuccessResponse, ClientError> {
        self.send_line(line)?;
        self.read_ok()
    }

    pub fn read_greeting(&mut self) -> Result<SuccessResponse, ClientError> {
        self.read_ok()
    }

    pub fn helo(&mut self, domain: &str) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok(&format!("HELO {domain}\r\n"))
    }

    pub fn ehlo(&mut self, domain: &str) -> Result<EhloResponse, ClientError> {
        self.send_line(&format!("EHLO {domain}\r\n"))?;
        let response = self.read_response()?.into_result()?;
        Ok(parse_ehlo(Response::new(response.code, response.lines)))
    }

    /// Issue `STARTTLS`, perform the handshake, and return the fresh
    /// post-handshake greeting. `client_hostname` is cleared server-side,
    /// so the caller must re-`EHLO`/`HELO`.
    pub fn starttls(&mut self, server_hostname: &str) -> Result<SuccessResponse, ClientError> {
        let go_ahead = self.send_recv_ok("STARTTLS\r\n")?;
        let _ = go_ahead;
        self.transport
            .starttls_client(server_hostname)
            .map_err(|e| Closed::new(format!("STARTTLS handshake failed: {e}")))?;
        self.tls = true;
        self.framer = LineFramer::new();
        self.read_ok()
    }

    pub fn auth_plain(&mut self, uid: &str, pwd: &str) -> Result<SuccessResponse, ClientError> {
        let mut blob = Vec::new();
        blob.push(0u8);
        blob.extend_from_slice(uid.as_bytes());
        blob.push(0u8);
        blob.extend_from_slice(pwd.as_bytes());
        self.send_recv_ok(&format!("AUTH PLAIN {}\r\n", base64::encode(&blob)))
    }

    pub fn auth_plain_two_step(&mut self, uid: &str, pwd: &str) -> Result<SuccessResponse, ClientError> {
        self.send_line("AUTH PLAIN\r\n")?;
        let _continue = self.read_ok()?;
        let mut blob = Vec::new();
        blob.push(0u8);
        blob.extend_from_slice(uid.as_bytes());
        blob.push(0u8);
        blob.extend_from_slice(pwd.as_bytes());
        self.send_recv_ok(&format!("{}\r\n", base64::encode(&blob)))
    }

    pub fn auth_login(&mut self, uid: &str, pwd: &str) -> Result<SuccessResponse, ClientError> {
        self.send_line("AUTH LOGIN\r\n")?;
        let _username_prompt = self.read_ok()?;
        self.send_line(&format!("{}\r\n", login::encode_prompt(uid)))?;
        let _password_prompt = self.read_ok()?;
        self.send_recv_ok(&format!("{}\r\n", login::encode_prompt(pwd)))
    }

    pub fn expn(&mut self, name: &str) -> Result<MailboxListResponse, ClientError> {
        self.send_line(&format!("EXPN {name}\r\n"))?;
        let r = self.read_response()?.into_result()?;
        Ok(MailboxListResponse { code: r.code, mailboxes: r.lines })
    }

    pub fn vrfy(&mut self, name: &str) -> Result<MailboxListResponse, ClientError> {
        self.send_line(&format!("VRFY {name}\r\n"))?;
        let r = self.read_response()?.into_result()?;
        Ok(MailboxListResponse { code: r.code, mailboxes: r.lines })
    }

    pub fn mail_from(&mut self, address: &str) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok(&format!("MAIL FROM:<{address}>\r\n"))
    }

    pub fn rcpt_to(&mut self, address: &str) -> Result<SuccessResponse, ClientError> {
        self.send_recv_ok(&format!("RCPT TO:<{address}>\r\n"))
    }

    pub fn data(&mut self, payload: &[u8]) -> Result<SuccessResponse, ClientError> {
        self.send_line("DATA\r\n")?;
        let _go_ahead = self.read_ok()?;
        self.transport
            .write(&stuff(payload))
            .map_err(|e| Closed::new(format!("write failed: {e}")))?;
        self.read_ok()
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

/// Build the credentials an `on_AuthEvent` handler would see, for use in
/// tests that drive a [`crate::driver::ServerProtocol`] directly without a
/// [`Client`].
pub fn credentials(uid: &str, pwd: &str) -> Credentials {
    Credentials { uid: uid.to_string(), pwd: Secret::new(pwd.to_string()) }
}
