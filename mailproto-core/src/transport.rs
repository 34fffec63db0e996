//! The transport contract the core is injected through.
//!
//! Nothing in this crate implements these traits; concrete blocking and
//! `tokio` adapters live in `mailproto-transport`. The core only needs to
//! know that bytes can be read and written, and that TLS can be turned on
//! in place.

use std::future::Future;

/// A blocking transport.
pub trait Transport {
    type Error;

    /// Read the next chunk of bytes. An empty return signals EOF.
    fn read(&mut self) -> Result<Vec<u8>, Self::Error>;

    /// Write `data` in full.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Perform a TLS handshake in the client role. Called once the core has
    /// emitted `StartTlsBegin` after a successful STARTTLS/STLS exchange.
    fn starttls_client(&mut self, server_hostname: &str) -> Result<(), Self::Error>;

    /// Perform a TLS handshake in the server role.
    fn starttls_server(&mut self) -> Result<(), Self::Error>;

    fn close(&mut self) -> Result<(), Self::Error>;
}

/// The async counterpart of [`Transport`].
pub trait AsyncTransport {
    type Error;

    fn read(&mut self) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;

    fn write(&mut self, data: &[u8]) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn starttls_client(
        &mut self,
        server_hostname: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn starttls_server(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn close(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
