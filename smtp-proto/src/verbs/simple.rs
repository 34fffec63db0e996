//! `RSET`, `NOOP`, `QUIT`: no host decision, just a pedantic
//! argument check and a fixed reply. `NOOP`'s arguments are always ignored
//! per RFC 5321 §4.1.1.9, even in pedantic mode.

use mailproto_core::Step;
use smtp_types::response::Response;

use crate::machine::{Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Rset,
    Noop,
    Quit,
}

#[derive(Debug)]
pub struct SimpleMachine(Kind);

impl SimpleMachine {
    pub fn rset() -> Self {
        Self(Kind::Rset)
    }

    pub fn noop() -> Self {
        Self(Kind::Noop)
    }

    pub fn quit() -> Self {
        Self(Kind::Quit)
    }
}

impl VerbMachine for SimpleMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        let Resume::Start(argtext) = input else {
            return Step::Fail(mailproto_core::Closed::internal_error());
        };
        if self.0 != Kind::Noop && session.config.pedantic && !argtext.trim().is_empty() {
            return Step::Done(Response::new(501, vec!["syntax error in parameters".into()]));
        }
        match self.0 {
            Kind::Rset => {
                session.reset_mail_transaction();
                Step::Done(Response::new(250, vec!["OK".into()]))
            }
            Kind::Noop => Step::Done(Response::new(250, vec!["OK".into()])),
            Kind::Quit => Step::Done(Response::new(221, vec!["bye".into()])),
        }
    }
}
