//! `CAPA` (RFC 2449): a dot-terminated capability list. No host decision --
//! capabilities come straight from [`crate::session::ServerConfig`], plus
//! `STLS` while the connection is not yet encrypted. Unlike `RSET`/`NOOP`/
//! `QUIT`, a stray argument is always rejected, pedantic or not (the
//! original never gates this one on `server.pedantic`).

use mailproto_core::Step;
use pop3_types::response::Response;

use crate::machine::{Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
pub struct CapaMachine;

impl VerbMachine for CapaMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        let Resume::Start(argtext) = input else {
            return Step::Fail(mailproto_core::Closed::internal_error());
        };
        if !argtext.trim().is_empty() {
            return Step::Done(Some(Response::single(false, "No parameters allowed")));
        }

        let mut lines: Vec<String> = session
            .config
            .capabilities
            .iter()
            .map(|(name, params)| {
                if params.is_empty() {
                    name.clone()
                } else {
                    format!("{name} {params}")
                }
            })
            .collect();
        if !session.tls {
            lines.push("STLS".to_string());
        }
        Step::Done(Some(Response::multi(true, "Capability list follows", lines)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ServerConfig;

    #[test]
    fn advertises_stls_before_tls_only() {
        let mut session = ServerSession::new(ServerConfig::default());
        let mut machine = CapaMachine;
        let Step::Done(Some(response)) = machine.step(&mut session, Resume::Start("")) else {
            panic!("expected Done");
        };
        assert!(response.lines.contains(&"STLS".to_string()));

        session.tls = true;
        let mut machine = CapaMachine;
        let Step::Done(Some(response)) = machine.step(&mut session, Resume::Start("")) else {
            panic!("expected Done");
        };
        assert!(!response.lines.contains(&"STLS".to_string()));
    }
}
