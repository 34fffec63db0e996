//! The synthetic GREETING "verb" queued by `ServerProtocol::startup`, the
//! POP3 counterpart of the SMTP greeting. Two host decisions in sequence:
//! whether (and with what challenge) to offer APOP, then whether to accept
//! the connection at all.

use mailproto_core::{BoolAcceptReject, Step};
use pop3_types::event::{ApopChallengeArgs, Event, GreetingArgs};
use pop3_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    AwaitChallenge,
    AwaitAccept,
}

#[derive(Debug, Default)]
pub struct GreetingMachine(State);

impl VerbMachine for GreetingMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(_)) => {
                let event = BoolAcceptReject::new(ApopChallengeArgs::default(), "", "");
                self.0 = State::AwaitChallenge;
                Step::Yield(Emit::Host(Event::ApopChallenge(event)))
            }
            (State::AwaitChallenge, Resume::Decided(Event::ApopChallenge(event))) => {
                let challenge = event.args.challenge.clone();
                session.apop_challenge = challenge.clone();

                let mut success = "POP3 server ready".to_string();
                if let Some(c) = &challenge {
                    success.push(' ');
                    success.push_str(c);
                }
                let event = BoolAcceptReject::new(
                    GreetingArgs { apop_challenge: challenge },
                    success,
                    "Too busy to accept mail right now",
                );
                self.0 = State::AwaitAccept;
                Step::Yield(Emit::Host(Event::GreetingAccept(event)))
            }
            (State::AwaitAccept, Resume::Decided(Event::GreetingAccept(event))) => {
                let outcome = event.resolve();
                Step::Done(Some(Response::single(outcome.is_success(), outcome.message().to_string())))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
