//! `APOP` (RFC 1939 §7): authenticates against the greeting's challenge in
//! one round trip, then locks the maildrop. Two host decisions in sequence:
//! authenticate the digest, then lock the maildrop.

use mailproto_core::{BoolAcceptReject, Step};
use pop3_types::event::{ApopAuthArgs, Event, LockMaildropArgs};
use pop3_types::response::Response;

use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::parse::parse_apop_args;
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    AwaitAuth,
    AwaitLock,
}

#[derive(Debug, Default)]
pub struct ApopMachine(State);

impl VerbMachine for ApopMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                if session.is_authenticated() {
                    return Step::Done(Some(Response::single(false, "already authenticated")));
                }
                let Some((uid, digest)) = parse_apop_args(argtext) else {
                    return Step::Done(Some(Response::single(false, "malformed request")));
                };
                let Some(challenge) = session.apop_challenge.clone() else {
                    return Step::Done(Some(Response::single(false, "authentication failed")));
                };
                let event = BoolAcceptReject::new(
                    ApopAuthArgs { uid, challenge, digest },
                    "maildrop locked and ready",
                    "authentication failed",
                );
                self.0 = State::AwaitAuth;
                Step::Yield(Emit::Host(Event::ApopAuth(event)))
            }
            (State::AwaitAuth, Resume::Decided(Event::ApopAuth(event))) => {
                let uid = event.args.uid.clone();
                let outcome = event.resolve();
                if !outcome.is_success() {
                    return Step::Done(Some(Response::single(false, outcome.message().to_string())));
                }
                session.auth_uid = Some(uid.clone());

                let event = BoolAcceptReject::new(
                    LockMaildropArgs { maildrop: uid, stat: None },
                    "maildrop locked and ready",
                    "maildrop not available to be locked",
                );
                self.0 = State::AwaitLock;
                Step::Yield(Emit::Host(Event::LockMaildrop(event)))
            }
            (State::AwaitLock, Resume::Decided(Event::LockMaildrop(event))) => {
                let stat = event.args.stat;
                let outcome = event.resolve();
                if !outcome.is_success() {
                    session.auth_uid = None;
                    return Step::Done(Some(Response::single(false, outcome.message().to_string())));
                }
                session.maildrop_stat = stat;
                let message = match stat {
                    Some(stat) => format!(
                        "maildrop has {} message{} ({} octets)",
                        stat.count,
                        if stat.count != 1 { "s" } else { "" },
                        stat.octets
                    ),
                    None => outcome.message().to_string(),
                };
                Step::Done(Some(Response::single(true, message)))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ServerConfig;
    use pop3_types::event::MaildropStat;

    #[test]
    fn rejects_apop_when_no_challenge_was_issued() {
        let mut session = ServerSession::new(ServerConfig::default());
        let mut machine = ApopMachine::default();
        let step = machine.step(&mut session, Resume::Start("mrose c4c9334bac560ecc979e58001b3e22fb"));
        let Step::Done(Some(response)) = step else {
            panic!("expected Done");
        };
        assert!(!response.ok);
    }

    #[test]
    fn success_message_uses_reported_stat() {
        let mut session = ServerSession::new(ServerConfig::default());
        session.apop_challenge = Some("<1896.697170952@dbc.mtview.ca.us>".to_string());
        let mut machine = ApopMachine::default();
        let _ = machine.step(&mut session, Resume::Start("mrose c4c9334bac560ecc979e58001b3e22fb"));

        let mut auth_event = BoolAcceptReject::new(
            ApopAuthArgs {
                uid: "mrose".into(),
                challenge: session.apop_challenge.clone().unwrap(),
                digest: "c4c9334bac560ecc979e58001b3e22fb".into(),
            },
            "maildrop locked and ready",
            "authentication failed",
        );
        auth_event.accept();
        let step = machine.step(&mut session, Resume::Decided(Event::ApopAuth(auth_event)));
        let Step::Yield(Emit::Host(Event::LockMaildrop(mut lock_event))) = step else {
            panic!("expected LockMaildrop event");
        };
        lock_event.args.stat = Some(MaildropStat { count: 2, octets: 320 });
        lock_event.accept();
        let step = machine.step(&mut session, Resume::Decided(Event::LockMaildrop(lock_event)));
        let Step::Done(Some(response)) = step else {
            panic!("expected Done");
        };
        assert_eq!(response.message, "maildrop has 2 messages (320 octets)");
    }
}
