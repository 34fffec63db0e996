//! The protocol driver: buffers lines, routes them to
//! the in-progress verb's state machine or starts a new one, and pumps
//! each machine to its next suspension point.

use log::{debug, trace};
use mailproto_core::ascii::b2s;
use mailproto_core::line::LineFramer;
use mailproto_core::transport::Transport;
use mailproto_core::{Closed, Step};

use crate::encode::encode_response;
use crate::event_handler::{self, ServerHandler};
use crate::machine::{Emit, Resume, VerbMachine};
use crate::parse::split_verb;
use crate::session::{ServerConfig, ServerSession};
use crate::verb::{self, Verb};
use crate::verbs::greeting::GreetingMachine;

/// What happened after feeding one line into the driver.
#[derive(Debug, PartialEq, Eq)]
pub enum PumpOutcome {
    /// The current request is still awaiting more input.
    NeedLine,
    /// The current request finished; the driver is ready for a new verb.
    RequestDone,
}

pub struct ServerProtocol {
    framer: LineFramer,
    pub session: ServerSession,
    current: Option<Box<dyn VerbMachine>>,
    current_verb: Option<Verb>,
}

impl ServerProtocol {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            framer: LineFramer::new(),
            session: ServerSession::new(config),
            current: None,
            current_verb: None,
        }
    }

    /// Queue the synthetic GREETING request. Must be called once before
    /// the first byte is read from the peer.
    pub fn startup<T>(&mut self, transport: &mut T, handler: &mut dyn ServerHandler) -> Result<(), Closed>
    where
        T: Transport,
        T::Error: std::fmt::Display,
    {
        self.current = Some(Box::new(GreetingMachine::default()));
        self.current_verb = None;
        self.pump(transport, handler, Resume::Start(""))?;
        Ok(())
    }

    /// Feed a chunk of bytes (empty for EOF) into the driver.
    pub fn receive<T>(
        &mut self,
        transport: &mut T,
        handler: &mut dyn ServerHandler,
        data: &[u8],
    ) -> Result<(), Closed>
    where
        T: Transport,
        T::Error: std::fmt::Display,
    {
        if data.is_empty() && self.framer.is_empty() {
            return Err(Closed::eof());
        }
        let lines = self.framer.receive(data)?;
        for line in lines {
            self.receive_line(transport, handler, &line)?;
        }
        Ok(())
    }

    fn receive_line<T>(
        &mut self,
        transport: &mut T,
        handler: &mut dyn ServerHandler,
        line: &[u8],
    ) -> Result<(), Closed>
    where
        T: Transport,
        T::Error: std::fmt::Display,
    {
        trace!("<- {}", String::from_utf8_lossy(line).trim_end());

        let input = if self.current.is_some() {
            Resume::Line(line)
        } else {
            let text = match b2s(line) {
                Ok(text) => text,
                Err(e) => {
                    write_error(transport, 500, &format!("invalid input: {e}"))?;
                    return Ok(());
                }
            };
            let (word, argtext) = split_verb(text);
            let Some(v) = verb::lookup(word) else {
                write_error(transport, 500, "unrecognized command")?;
                return Ok(());
            };
            if v.tls_excluded() && self.session.tls {
                write_error(transport, 503, "command not allowed once TLS is active")?;
                return Ok(());
            }
            self.current = Some(v.new_machine());
            self.current_verb = Some(v);
            Resume::Start(argtext)
        };

        let outcome = self.pump(transport, handler, input)?;
        if outcome == PumpOutcome::RequestDone && self.current_verb == Some(Verb::Quit) {
            return Err(Closed::new("QUIT"));
        }
        Ok(())
    }

    fn pump<T>(
        &mut self,
        transport: &mut T,
        handler: &mut dyn ServerHandler,
        mut input: Resume<'_>,
    ) -> Result<PumpOutcome, Closed>
    where
        T: Transport,
        T::Error: std::fmt::Display,
    {
        loop {
            let machine = self
                .current
                .as_mut()
                .expect("pump called without an active request");
            let step = machine.step(&mut self.session, input);
            match step {
                Step::Yield(Emit::Write(bytes)) => {
                    transport
                        .write(&bytes)
                        .map_err(|e| Closed::new(format!("write failed: {e}")))?;
                    input = Resume::Continue;
                }
                Step::Yield(Emit::BeginTls) => {
                    transport
                        .starttls_server()
                        .map_err(|e| Closed::new(format!("STARTTLS failed: {e}")))?;
                    self.session.tls = true;
                    self.session.reset_after_starttls();
                    debug!("TLS established");
                    input = Resume::Continue;
                }
                Step::Yield(Emit::Host(mut event)) => {
                    event_handler::dispatch(handler, &mut event);
                    input = Resume::Decided(event);
                }
                Step::NeedData => return Ok(PumpOutcome::NeedLine),
                Step::Done(response) => {
                    transport
                        .write(&encode_response(&response))
                        .map_err(|e| Closed::new(format!("write failed: {e}")))?;
                    self.current = None;
                    return Ok(PumpOutcome::RequestDone);
                }
                Step::Fail(closed) => {
                    self.current = None;
                    return Err(closed);
                }
            }
        }
    }
}

fn write_error<T>(transport: &mut T, code: u16, message: &str) -> Result<(), Closed>
where
    T: Transport,
    T::Error: std::fmt::Display,
{
    let response = smtp_types::response::Response::new(code, vec![message.to_string()]);
    transport
        .write(&encode_response(&response))
        .map_err(|e| Closed::new(format!("write failed: {e}")))
}

