//! The server facade: drives [`ServerProtocol`] to completion over a
//! concrete [`Transport`], dispatching host events along the way.

use mailproto_core::Closed;
use mailproto_core::transport::Transport;

use crate::driver::ServerProtocol;
use crate::event_handler::ServerHandler;
use crate::session::ServerConfig;

pub struct Server<T> {
    transport: T,
    protocol: ServerProtocol,
}

impl<T> Server<T>
where
    T: Transport,
    T::Error: std::fmt::Display,
{
    pub fn new(transport: T, config: ServerConfig) -> Self {
        Self { transport, protocol: ServerProtocol::new(config) }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Run the connection to completion: send the greeting, then read and
    /// dispatch requests until the peer disconnects, issues `QUIT`, or a
    /// fatal error closes the connection. Returns the reason.
    pub fn run(&mut self, handler: &mut dyn ServerHandler) -> Closed {
        if let Err(closed) = self.protocol.startup(&mut self.transport, handler) {
            return closed;
        }
        loop {
            let chunk = match self.transport.read() {
                Ok(chunk) => chunk,
                Err(e) => return Closed::new(format!("read failed: {e}")),
            };
            if let Err(closed) = self.protocol.receive(&mut self.transport, handler, &chunk) {
                return closed;
            }
        }
    }
}
