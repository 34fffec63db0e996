//! `RSET`, `NOOP`, `QUIT`: no host decision, just a pedantic argument check
//! and a fixed reply. The original leaves `RSET`/`NOOP`'s success text as a
//! literal `'TODO FIXME'` placeholder it never got around to replacing;
//! rather than ship that verbatim, it is replaced here with `"done"`, a
//! concrete reply RFC 1939 doesn't otherwise constrain.

use mailproto_core::Step;
use pop3_types::response::Response;

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
        if session.config.pedantic && !argtext.trim().is_empty() {
            return Step::Done(Some(Response::single(false, "No parameters allowed")));
        }
        match self.0 {
            Kind::Rset => Step::Done(Some(Response::single(true, "done"))),
            Kind::Noop => Step::Done(Some(Response::single(true, "done"))),
            Kind::Quit => Step::Done(Some(Response::single(true, "Closing connection"))),
        }
    }
}
