//! `AUTH` (RFC 4954): parses the mechanism out of the
//! argument text, then dispatches to that mechanism's challenge/response
//! exchange.

use mailproto_core::{AcceptReject, Step};
use smtp_types::auth::Credentials;
use smtp_types::event::{AuthArgs, Event};
use smtp_types::response::Response;
use smtp_types::secret::Secret;

use crate::encode::encode_response;
use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;
use crate::verbs::mechanisms::registry::{MechanismKind, lookup};
use crate::verbs::mechanisms::{login, plain};

const MALFORMED: &str = "malformed auth input RFC4616#2";

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    AwaitPlainBlob,
    AwaitLoginUser,
    AwaitLoginPass { uid: String },
    AwaitDecision,
}

#[derive(Debug, Default)]
pub struct AuthMachine {
    state: State,
    mechanism: String,
}

impl AuthMachine {
    fn reject_malformed() -> VerbStep {
        Step::Done(Response::new(501, vec![MALFORMED.to_string()]))
    }

    fn credentials_event(&mut self, uid: String, pwd: String) -> VerbStep {
        let args = AuthArgs {
            mechanism: self.mechanism.clone(),
            credentials: Credentials { uid, pwd: Secret::new(pwd) },
        };
        let event = AcceptReject::new(
            args,
            (235, "Authentication successful".to_string()),
            (535, "authentication failed".to_string()),
        );
        self.state = State::AwaitDecision;
        Step::Yield(Emit::Host(Event::Auth(event)))
    }
}

impl VerbMachine for AuthMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.state, input) {
            (State::Init, Resume::Start(argtext)) => {
                if session.is_authenticated() {
                    return Step::Done(Response::new(503, vec!["already authenticated".into()]));
                }
                if session.client_hostname.is_none() {
                    return Step::Done(Response::new(503, vec!["send HELO/EHLO first".into()]));
                }
                let argtext = argtext.trim();
                let (mech_word, rest) = match argtext.split_once(char::is_whitespace) {
                    Some((m, r)) => (m, r.trim()),
                    None => (argtext, ""),
                };
                if mech_word.is_empty() {
                    return Step::Done(Response::new(501, vec!["syntax: AUTH mechanism".into()]));
                }
                let Some((kind, tls_required)) = lookup(mech_word) else {
                    return Step::Done(Response::new(
                        504,
                        vec!["unrecognized authentication type".into()],
                    ));
                };
                if tls_required && !session.tls {
                    return Step::Done(Response::new(
                        535,
                        vec!["SSL/TLS connection required".into()],
                    ));
                }
                self.mechanism = mech_word.to_ascii_uppercase();
                match kind {
                    MechanismKind::Plain => {
                        if rest.is_empty() {
                            self.state = State::AwaitPlainBlob;
                            Step::Yield(Emit::Write(encode_response(&Response::new(
                                334,
                                vec![String::new()],
                            ))))
                        } else {
                            match mailproto_core::base64::decode(rest)
                                .ok()
                                .and_then(|b| plain::decode_blob(&b))
                            {
                                Some((uid, pwd)) => self.credentials_event(uid, pwd),
                                None => Self::reject_malformed(),
                            }
                        }
                    }
                    MechanismKind::Login => {
                        self.state = State::AwaitLoginUser;
                        Step::Yield(Emit::Write(encode_response(&Response::new(
                            334,
                            vec![login::encode_prompt(login::USERNAME_PROMPT)],
                        ))))
                    }
                }
            }
            (State::AwaitPlainBlob, Resume::Continue) => Step::NeedData,
            (State::AwaitPlainBlob, Resume::Line(line)) => {
                let text = mailproto_core::line::strip_terminator(line);
                match mailproto_core::ascii::b2s(text)
                    .ok()
                    .and_then(|s| mailproto_core::base64::decode(s).ok())
                    .and_then(|b| plain::decode_blob(&b))
                {
                    Some((uid, pwd)) => self.credentials_event(uid, pwd),
                    None => Self::reject_malformed(),
                }
            }
            (State::AwaitLoginUser, Resume::Continue) => Step::NeedData,
            (State::AwaitLoginUser, Resume::Line(line)) => {
                let text = mailproto_core::line::strip_terminator(line);
                match mailproto_core::ascii::b2s(text)
                    .ok()
                    .and_then(|s| mailproto_core::base64::decode(s).ok())
                    .and_then(|b| String::from_utf8(b).ok())
                {
                    Some(uid) => {
                        self.state = State::AwaitLoginPass { uid };
                        Step::Yield(Emit::Write(encode_response(&Response::new(
                            334,
                            vec![login::encode_prompt(login::PASSWORD_PROMPT)],
                        ))))
                    }
                    None => Self::reject_malformed(),
                }
            }
            (State::AwaitLoginPass { .. }, Resume::Continue) => Step::NeedData,
            (State::AwaitLoginPass { uid }, Resume::Line(line)) => {
                let uid = uid.clone();
                let text = mailproto_core::line::strip_terminator(line);
                match mailproto_core::ascii::b2s(text)
                    .ok()
                    .and_then(|s| mailproto_core::base64::decode(s).ok())
                    .and_then(|b| String::from_utf8(b).ok())
                {
                    Some(pwd) => self.credentials_event(uid, pwd),
                    None => Self::reject_malformed(),
                }
            }
            (State::AwaitDecision, Resume::Decided(Event::Auth(event))) => {
                let uid = event.args.credentials.uid.clone();
                let outcome = event.resolve();
                if outcome.is_success() {
                    session.auth_uid = Some(uid);
                }
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
