//! The async counterpart of [`crate::blocking::TcpTransport`], built on
//! `tokio::net::TcpStream` and `tokio-rustls`.

use std::io;
use std::sync::Arc;

use mailproto_core::transport::AsyncTransport;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::{TlsAcceptor, TlsConnector, TlsStream};

use crate::tls::default_client_config;

enum State {
    Plain(TcpStream),
    Tls(TlsStream<TcpStream>),
    Poisoned,
}

pub struct AsyncTcpTransport {
    state: State,
    client_config: Option<Arc<ClientConfig>>,
    server_config: Option<Arc<ServerConfig>>,
}

impl AsyncTcpTransport {
    pub async fn connect(addr: impl tokio::net::ToSocketAddrs) -> io::Result<Self> {
        Ok(Self::from_stream(TcpStream::connect(addr).await?))
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
}

impl AsyncTransport for AsyncTcpTransport {
    type Error = io::Error;

    async fn read(&mut self) -> Result<Vec<u8>, Self::Error> {
        let mut buf = [0u8; 4096];
        let n = match &mut self.state {
            State::Plain(s) => s.read(&mut buf).await?,
            State::Tls(s) => s.read(&mut buf).await?,
            State::Poisoned => unreachable!("transport used after a failed TLS upgrade"),
        };
        Ok(buf[..n].to_vec())
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match &mut self.state {
            State::Plain(s) => s.write_all(data).await,
            State::Tls(s) => s.write_all(data).await,
            State::Poisoned => unreachable!("transport used after a failed TLS upgrade"),
        }
    }

    async fn starttls_client(&mut self, server_hostname: &str) -> Result<(), Self::Error> {
        let config = self
            .client_config
            .clone()
            .ok_or_else(|| io::Error::other("no client TLS config configured"))?;
        let State::Plain(tcp) = std::mem::replace(&mut self.state, State::Poisoned) else {
            return Err(io::Error::other("transport is not in a plain state"));
        };
        let server_name = ServerName::try_from(server_hostname.to_string())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let stream = TlsConnector::from(config).connect(server_name, tcp).await?;
        self.state = State::Tls(TlsStream::Client(stream));
        Ok(())
    }

    async fn starttls_server(&mut self) -> Result<(), Self::Error> {
        let config = self
            .server_config
            .clone()
            .ok_or_else(|| io::Error::other("no server TLS config configured"))?;
        let State::Plain(tcp) = std::mem::replace(&mut self.state, State::Poisoned) else {
            return Err(io::Error::other("transport is not in a plain state"));
        };
        let stream = TlsAcceptor::from(config).accept(tcp).await?;
        self.state = State::Tls(TlsStream::Server(stream));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        match &mut self.state {
            State::Plain(s) => s.shutdown().await,
            State::Tls(s) => s.shutdown().await,
            State::Poisoned => Ok(()),
        }
    }
}
