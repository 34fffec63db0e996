//! `STLS` (RFC 2595 §4). Unlike SMTP's `STARTTLS`, the server does not
//! re-greet after the handshake completes; this machine finishes silently
//! once the handshake is done rather than emitting a fresh greeting.

use mailproto_core::{BoolAcceptReject, Step};
use pop3_types::event::{Event, StlsArgs};
use pop3_types::response::Response;

use crate::encode::encode_response;
use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    AwaitDecision,
    AwaitHandshake,
    AfterHandshake,
}

#[derive(Debug, Default)]
pub struct StlsMachine(State);

impl VerbMachine for StlsMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                if !argtext.trim().is_empty() {
                    return Step::Done(Some(Response::single(false, "No parameters allowed")));
                }
                if session.tls {
                    return Step::Done(Some(Response::single(
                        false,
                        "Command not permitted when TLS active",
                    )));
                }
                let event = BoolAcceptReject::new(
                    StlsArgs,
                    "Begin TLS negotiation",
                    "TLS not available at the moment",
                );
                self.0 = State::AwaitDecision;
                Step::Yield(Emit::Host(Event::StlsAccept(event)))
            }
            (State::AwaitDecision, Resume::Decided(Event::StlsAccept(event))) => {
                let outcome = event.resolve();
                if !outcome.is_success() {
                    return Step::Done(Some(Response::single(false, outcome.message().to_string())));
                }
                self.0 = State::AwaitHandshake;
                Step::Yield(Emit::Write(encode_response(&Response::single(
                    true,
                    outcome.message().to_string(),
                ))))
            }
            (State::AwaitHandshake, Resume::Continue) => {
                self.0 = State::AfterHandshake;
                Step::Yield(Emit::BeginTls)
            }
            (State::AfterHandshake, Resume::Continue) => Step::Done(None),
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
