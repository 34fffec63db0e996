//! A blocking [`Transport`] over `std::net::TcpStream`, upgrading to TLS in
//! place via `rustls::StreamOwned` (RFC 3207/RFC 2595 STARTTLS/STLS).

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;

use mailproto_core::transport::Transport;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, ServerConfig, ServerConnection, StreamOwned};

use crate::tls::default_client_config;

enum State {
    Plain(TcpStream),
    Client(Box<StreamOwned<ClientConnection, TcpStream>>),
    Server(Box<StreamOwned<ServerConnection, TcpStream>>),
    Poisoned,
}

pub struct TcpTransport {
    state: State,
    client_config: Option<Arc<ClientConfig>>,
    server_config: Option<Arc<ServerConfig>>,
}

impl TcpTransport {
    /// Connect plain; [`starttls_client`](Transport::starttls_client) later
    /// upgrades in place using `webpki-roots`' trust set unless
    /// [`with_client_config`](Self::with_client_config) overrides it.
    pub fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        Ok(Self::from_stream(TcpStream::connect(addr)?))
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            state: State::Plain(stream),
            client_config: Some(default_client_config()),
            server_config: None,
        }
    }

    pub fn with_client_config(mut self, config: Arc<ClientConfig>) -> Self {
        self.client_config = Some(config);
        self
    }

    pub fn with_server_config(mut self, config: Arc<ServerConfig>) -> Self {
        self.server_config = Some(config);
        self
    }

    fn reader(&mut self) -> &mut dyn Read {
        match &mut self.state {
            State::Plain(s) => s,
            State::Client(s) => s.as_mut(),
            State::Server(s) => s.as_mut(),
            State::Poisoned => unreachable!("transport used after a failed TLS upgrade"),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match &mut self.state {
            State::Plain(s) => s,
            State::Client(s) => s.as_mut(),
            State::Server(s) => s.as_mut(),
            State::Poisoned => unreachable!("transport used after a failed TLS upgrade"),
        }
    }
}

impl Transport for TcpTransport {
    type Error = io::Error;

    fn read(&mut self) -> Result<Vec<u8>, Self::Error> {
        let mut buf = [0u8; 4096];
        let n = self.reader().read(&mut buf)?;
        Ok(buf[..n].to_vec())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.writer().write_all(data)
    }

    fn starttls_client(&mut self, server_hostname: &str) -> Result<(), Self::Error> {
        let config = self
            .client_config
            .clone()
            .ok_or_else(|| io::Error::other("no client TLS config configured"))?;
        let State::Plain(tcp) = std::mem::replace(&mut self.state, State::Poisoned) else {
            return Err(io::Error::other("transport is not in a plain state"));
        };
        let server_name = ServerName::try_from(server_hostname.to_string())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let conn = ClientConnection::new(config, server_name)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        self.state = State::Client(Box::new(StreamOwned::new(conn, tcp)));
        Ok(())
    }

    fn starttls_server(&mut self) -> Result<(), Self::Error> {
        let config = self
            .server_config
            .clone()
            .ok_or_else(|| io::Error::other("no server TLS config configured"))?;
        let State::Plain(tcp) = std::mem::replace(&mut self.state, State::Poisoned) else {
            return Err(io::Error::other("transport is not in a plain state"));
        };
        let conn =
            ServerConnection::new(config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        self.state = State::Server(Box::new(StreamOwned::new(conn, tcp)));
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        let sock = match &self.state {
            State::Plain(s) => s,
            State::Client(s) => &s.sock,
            State::Server(s) => &s.sock,
            State::Poisoned => return Ok(()),
        };
        sock.shutdown(Shutdown::Both)
    }
}
