//! `HELO`.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, HeloArgs};
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
pub struct HeloMachine(State);

impl VerbMachine for HeloMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                let domain = argtext.trim();
                if domain.is_empty() {
                    return Step::Done(Response::new(501, vec!["syntax: HELO hostname".into()]));
                }
                if session.config.pedantic && session.client_hostname.is_some() {
                    return Step::Done(Response::new(
                        503,
                        vec!["you already said HELO RFC1869#4.2".into()],
                    ));
                }
                let event = AcceptReject::new(
                    HeloArgs { domain: domain.to_string() },
                    (250, session.config.hostname.clone()),
                    (550, "HELO rejected".to_string()),
                );
                self.0 = State::Decided;
                Step::Yield(Emit::Host(Event::HeloAccept(event)))
            }
            (State::Decided, Resume::Decided(Event::HeloAccept(event))) => {
                let domain = event.args.domain.clone();
                let outcome = event.resolve();
                if outcome.is_success() {
                    session.client_hostname = Some(domain);
                }
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
