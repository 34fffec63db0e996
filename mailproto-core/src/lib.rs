//! Wire-level primitives shared by the SMTP and POP3 sans-I/O engines.
//!
//! This crate has no knowledge of either protocol's grammar; it provides
//! the line framer, ASCII/base64 helpers, the dot-stuffing convention both
//! protocols use for multi-line bodies, the generic `AcceptReject` event
//! harness, the `Step` state-machine vocabulary, and the transport traits
//! the engines are driven through.

pub mod ascii;
pub mod base64;
pub mod error;
pub mod event;
pub mod line;
pub mod step;
pub mod stuffing;
pub mod transport;

pub use error::{Closed, ProtocolError};
pub use event::{AcceptReject, BoolAcceptReject, BoolOutcome, Outcome};
pub use line::{LineFramer, MAXLINE};
pub use step::Step;
