//! `RCPT TO`.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, RcptToArgs};
use smtp_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::parse::parse_rcpt_to_address;
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Decided,
}

#[derive(Debug, Default)]
pub struct RcptToMachine(State);

impl VerbMachine for RcptToMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                if !session.is_authenticated() {
                    return Step::Done(Response::new(530, vec!["authentication required".into()]));
                }
                if session.mail_from.is_none() {
                    return Step::Done(Response::new(503, vec!["need MAIL command first".into()]));
                }
                let Some(address) = parse_rcpt_to_address(argtext) else {
                    return Step::Done(Response::new(501, vec!["syntax: RCPT TO:<address>".into()]));
                };
                let event = AcceptReject::new(
                    RcptToArgs { address },
                    (250, "OK".to_string()),
                    (550, "No such user here".to_string()),
                );
                self.0 = State::Decided;
                Step::Yield(Emit::Host(Event::RcptTo(event)))
            }
            (State::Decided, Resume::Decided(Event::RcptTo(event))) => {
                let address = event.args.address.clone();
                let outcome = event.resolve();
                if outcome.is_success() {
                    session.rcpt_to.push(address);
                }
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
