//! `DATA`: send `354`, collect de-stuffed body lines until the
//! lone-dot terminator, yield `Complete`, then reset the mail transaction
//! regardless of the host's decision.

use mailproto_core::stuffing::{BodyLine, destuff_line};
use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{DataArgs, Event};
use smtp_types::response::Response;

use crate::encode::encode_response;
use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Collecting,
    Decided,
}

#[derive(Debug, Default)]
pub struct DataMachine {
    state: State,
    lines: Vec<Vec<u8>>,
}

impl VerbMachine for DataMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.state, input) {
            (State::Init, Resume::Start(argtext)) => {
                if !session.is_authenticated() {
                    return Step::Done(Response::new(530, vec!["authentication required".into()]));
                }
                if session.mail_from.is_none() {
                    return Step::Done(Response::new(503, vec!["need MAIL command first".into()]));
                }
                if session.rcpt_to.is_empty() {
                    return Step::Done(Response::new(503, vec!["need RCPT command first".into()]));
                }
                if !argtext.trim().is_empty() {
                    return Step::Done(Response::new(501, vec!["syntax: DATA".into()]));
                }
                self.state = State::Collecting;
                Step::Yield(Emit::Write(encode_response(&Response::new(
                    354,
                    vec!["Start mail input; end with <CRLF>.<CRLF>".into()],
                ))))
            }
            (State::Collecting, Resume::Continue) => Step::NeedData,
            (State::Collecting, Resume::Line(line)) => match destuff_line(line) {
                BodyLine::Terminator => {
                    let args = DataArgs {
                        mail_from: session.mail_from.clone().unwrap_or_default(),
                        rcpt_to: session.rcpt_to.clone(),
                        data: std::mem::take(&mut self.lines),
                    };
                    let event = AcceptReject::new(
                        args,
                        (250, "OK".to_string()),
                        (554, "transaction failed".to_string()),
                    );
                    self.state = State::Decided;
                    Step::Yield(Emit::Host(Event::Complete(event)))
                }
                BodyLine::Data(data) => {
                    self.lines.push(data.into_owned());
                    Step::NeedData
                }
            },
            (State::Decided, Resume::Decided(Event::Complete(event))) => {
                let outcome = event.resolve();
                session.reset_mail_transaction();
                Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
