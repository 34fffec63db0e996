//! The synthetic GREETING "verb" queued by `ServerProtocol::startup`.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, GreetingArgs};
use smtp_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Decided,
}

#[derive(Debug, Default)]
pub struct GreetingMachine(State);

impl VerbMachine for GreetingMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(_)) => {
                let event = AcceptReject::new(
                    GreetingArgs,
                    (220, format!("{} ESMTP ready", session.config.hostname)),
                    (421, "service not available".to_string()),
                );
                self.0 = State::Decided;
                Step::Yield(Emit::Host(Event::GreetingAccept(event)))
            }
            (State::Decided, Resume::Decided(Event::GreetingAccept(event))) => {
                let outcome = event.resolve();
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
