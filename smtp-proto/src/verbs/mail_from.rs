//! `MAIL FROM`.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, MailFromArgs};
use smtp_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::parse::parse_mail_from_address;
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Decided,
}

#[derive(Debug, Default)]
pub struct MailFromMachine(State);

impl VerbMachine for MailFromMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                if !session.is_authenticated() {
                    return Step::Done(Response::new(530, vec!["authentication required".into()]));
                }
                let Some(address) = parse_mail_from_address(argtext) else {
                    return Step::Done(Response::new(501, vec!["syntax: MAIL FROM:<address>".into()]));
                };
                let event = AcceptReject::new(
                    MailFromArgs { address },
                    (250, "OK".to_string()),
                    (550, "sender rejected".to_string()),
                );
                self.0 = State::Decided;
                Step::Yield(Emit::Host(Event::MailFrom(event)))
            }
            (State::Decided, Resume::Decided(Event::MailFrom(event))) => {
                let address = event.args.address.clone();
                let outcome = event.resolve();
                if outcome.is_success() {
                    session.mail_from = Some(address);
                }
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
