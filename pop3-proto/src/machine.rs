//! The hand-rolled state-machine vocabulary POP3 request verbs are built
//! from: each verb is a small `step(input) -> Step` machine instead of a
//! suspendable coroutine.

use mailproto_core::Step;
use pop3_types::event::Event;
use pop3_types::response::Response;

/// What the driver is handing back to a [`VerbMachine`] on this call.
pub enum Resume<'a> {
    /// First call: the argument text following the verb word.
    Start(&'a str),
    /// A new line of input has arrived, satisfying a prior `NeedData`.
    Line(&'a [u8]),
    /// The host has finished calling `accept()`/`reject()` on the event
    /// this machine last yielded.
    Decided(Event),
    /// A non-semantic event (a wire write, a TLS handshake) has been
    /// carried out by the driver; resume without new data.
    Continue,
}

/// What a [`VerbMachine`] yields on each step.
pub enum Emit {
    /// Write these raw bytes to the wire now, then immediately resume with
    /// [`Resume::Continue`].
    Write(Vec<u8>),
    /// Surface a host-visible event. The driver dispatches it to the
    /// [`crate::event_handler::ServerHandler`], then resumes with
    /// [`Resume::Decided`].
    Host(Event),
    /// Tell the driver to perform the TLS handshake now, then resume with
    /// [`Resume::Continue`].
    BeginTls,
}

/// `None` lets a request terminate without writing a final reply line --
/// used only by `STLS`, which already wrote its `+OK` before the handshake
/// and (unlike SMTP's `STARTTLS`) does not re-greet afterwards.
pub type VerbStep = Step<Emit, Option<Response>>;

/// A server-side verb's protocol state machine.
pub trait VerbMachine {
    fn step(&mut self, session: &mut crate::session::ServerSession, input: Resume<'_>) -> VerbStep;
}
