//! Concrete [`mailproto_core::transport`] adapters: a blocking one over
//! `std::net::TcpStream` and an async one over `tokio`, both upgrading to
//! TLS in place via `rustls`/`tokio-rustls`. Nothing in `mailproto-core` or
//! the protocol engines depends on this crate; demos wire it in.

#[cfg(feature = "blocking")]
pub mod blocking;
#[cfg(feature = "tokio")]
pub mod tokio_transport;
#[cfg(any(feature = "blocking", feature = "tokio"))]
pub mod tls;

#[cfg(feature = "blocking")]
pub use blocking::TcpTransport;
#[cfg(feature = "tokio")]
pub use tokio_transport::AsyncTcpTransport;
