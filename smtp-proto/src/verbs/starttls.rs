//! `STARTTLS` (RFC 3207). After the go-ahead `220` is flushed and
//! the handshake completes, the server re-greets so the peer re-issues
//! EHLO/HELO over the now-encrypted channel.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, StartTlsArgs};
use smtp_types::response::Response;

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
pub struct StartTlsMachine(State);

impl VerbMachine for StartTlsMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                if session.tls {
                    return Step::Done(Response::new(
                        503,
                        vec!["already using a secure connection".into()],
                    ));
                }
                if !argtext.trim().is_empty() {
                    return Step::Done(Response::new(501, vec!["syntax: STARTTLS".into()]));
                }
                let event = AcceptReject::new(
                    StartTlsArgs,
                    (220, "Ready to start TLS".to_string()),
                    (454, "TLS not available".to_string()),
                );
                self.0 = State::AwaitDecision;
                Step::Yield(Emit::Host(Event::StartTlsAccept(event)))
            }
            (State::AwaitDecision, Resume::Decided(Event::StartTlsAccept(event))) => {
                let outcome = event.resolve();
                if !outcome.is_success() {
                    return Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]));
                }
                self.0 = State::AwaitHandshake;
                Step::Yield(Emit::Write(encode_response(&Response::new(
                    outcome.code(),
                    vec![outcome.message().to_string()],
                ))))
            }
            (State::AwaitHandshake, Resume::Continue) => {
                self.0 = State::AfterHandshake;
                Step::Yield(Emit::BeginTls)
            }
            (State::AfterHandshake, Resume::Continue) => Step::Done(Response::new(
                220,
                vec![format!("{} ESMTP ready", session.config.hostname)],
            )),
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
