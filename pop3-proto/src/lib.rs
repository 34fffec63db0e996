//! Sans-I/O POP3 protocol engine: client and server roles, driven over a
//! line-at-a-time framer, with all wire I/O injected through
//! [`mailproto_core::transport::Transport`], covering POP3's verb subset:
//! GREETING, CAPA, STLS, APOP, RSET/NOOP/QUIT.

pub mod apop;
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

pub use apop::apop_hash;
pub use client::{Client, ClientError};
pub use driver::ServerProtocol;
pub use event_handler::ServerHandler;
pub use server::Server;
pub use session::{ServerConfig, ServerSession};
