//! Sans-I/O SMTP/ESMTP protocol engine: client and server roles, driven
//! over a line-at-a-time framer, with all wire I/O injected through
//! [`mailproto_core::transport::Transport`].

pub mod client;
pub mod driver;
pub mod encode;
pub mod event_handler;
pub mod machine;
pub mod parse;
pub mod server;
pub mod session;
pub mod verb;
pub mod verbs;

pub use client::{Client, ClientError};
pub use driver::ServerProtocol;
pub use event_handler::ServerHandler;
pub use server::Server;
pub use session::{ServerConfig, ServerSession};
