//! `EXPN`/`VRFY`: both require a prior successful AUTH, yield a
//! mailbox-query event, and reply 250 with each mailbox as a continuation
//! line on accept.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{Event, MailboxQueryArgs};
use smtp_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Expn,
    Vrfy,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Decided,
}

#[derive(Debug)]
pub struct MailboxQueryMachine {
    kind: Kind,
    state: State,
}

impl MailboxQueryMachine {
    pub fn expn() -> Self {
        Self { kind: Kind::Expn, state: State::Init }
    }

    pub fn vrfy() -> Self {
        Self { kind: Kind::Vrfy, state: State::Init }
    }
}

impl VerbMachine for MailboxQueryMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.state, input) {
            (State::Init, Resume::Start(argtext)) => {
                if !session.is_authenticated() {
                    return Step::Done(Response::new(530, vec!["authentication required".into()]));
                }
                let event = AcceptReject::new(
                    MailboxQueryArgs { argtext: argtext.to_string(), mailboxes: Vec::new() },
                    (250, "OK".to_string()),
                    (550, "not available".to_string()),
                );
                self.state = State::Decided;
                let wrapped = match self.kind {
                    Kind::Expn => Event::Expn(event),
                    Kind::Vrfy => Event::Vrfy(event),
                };
                Step::Yield(Emit::Host(wrapped))
            }
            (State::Decided, Resume::Decided(Event::Expn(event) | Event::Vrfy(event))) => {
                let mailboxes = event.args.mailboxes.clone();
                let outcome = event.resolve();
                if outcome.is_success() {
                    let lines = if mailboxes.is_empty() {
                        vec![outcome.message().to_string()]
                    } else {
                        mailboxes
                    };
                    Step::Done(Response::new(outcome.code(), lines))
                } else {
                    Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
                }
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
