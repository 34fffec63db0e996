//! The hand-rolled state-machine vocabulary request verbs are built from:
//! each verb is a small `step(input) -> Step` machine instead of a
//! suspendable coroutine.
//!
//! Each verb implements [`VerbMachine`] instead of a suspendable generator:
//! `step` is called once to start (with the command's argument text), then
//! again every time the driver satisfies a [`Step::NeedData`] or a host
//! finishes deciding an [`smtp_types::event::Event`].

use mailproto_core::Step;
use smtp_types::event::Event;
use smtp_types::response::Response;

/// What the driver is handing back to a [`VerbMachine`] on this call.
pub enum Resume<'a> {
    /// First call: the argument text following the verb word.
    Start(&'a str),
    /// A new line of input has arrived, satisfying a prior `NeedData`.
    Line(&'a [u8]),
    /// The host has finished calling `accept()`/`reject()` on the event
    /// this machine last yielded; it is handed back so the machine can
    /// call `.resolve()` on it.
    Decided(Event),
    /// A non-semantic event (a wire write, a TLS handshake) has been
    /// carried out by the driver; resume without new data.
    Continue,
}

/// What a [`VerbMachine`] yields on each step.
pub enum Emit {
    /// Write these raw bytes to the wire now, then immediately resume with
    /// [`Resume::Continue`] (no host decision is needed).
    Write(Vec<u8>),
    /// Surface a host-visible event. The driver dispatches it to the
    /// [`crate::event_handler::ServerHandler`], then resumes with
    /// [`Resume::Decided`].
    Host(Event),
    /// Tell the driver to perform the TLS handshake now, then resume with
    /// [`Resume::Continue`].
    BeginTls,
}

pub type VerbStep = Step<Emit, Response>;

/// A server-side verb's protocol state machine.
pub trait VerbMachine {
    fn step(&mut self, session: &mut crate::session::ServerSession, input: Resume<'_>) -> VerbStep;
}
