//! `STAT` (RFC 1939 §5). Rather than re-issue a host event, this reads back
//! the [`pop3_types::event::MaildropStat`] the host already reported when
//! `APOP` accepted the `LockMaildrop` event.

use mailproto_core::Step;
use pop3_types::response::Response;

use crate::machine::{Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;

#[derive(Debug, Default)]
pub struct StatMachine;

impl VerbMachine for StatMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        let Resume::Start(argtext) = input else {
            return Step::Fail(mailproto_core::Closed::internal_error());
        };
        if !argtext.trim().is_empty() {
            return Step::Done(Some(Response::single(false, "No parameters allowed")));
        }
        if !session.is_authenticated() {
            return Step::Done(Some(Response::single(false, "not authenticated")));
        }
        match session.maildrop_stat {
            Some(stat) => Step::Done(Some(Response::single(true, format!("{} {}", stat.count, stat.octets)))),
            None => Step::Done(Some(Response::single(false, "error accessing maildrop"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ServerConfig;
    use pop3_types::event::MaildropStat;

    #[test]
    fn rejects_before_authentication() {
        let mut session = ServerSession::new(ServerConfig::default());
        let Step::Done(Some(response)) = StatMachine.step(&mut session, Resume::Start("")) else {
            panic!("expected Done");
        };
        assert!(!response.ok);
    }

    #[test]
    fn reports_count_and_octets_after_lock() {
        let mut session = ServerSession::new(ServerConfig::default());
        session.auth_uid = Some("mrose".to_string());
        session.maildrop_stat = Some(MaildropStat { count: 2, octets: 320 });
        let Step::Done(Some(response)) = StatMachine.step(&mut session, Resume::Start("")) else {
            panic!("expected Done");
        };
        assert_eq!(response.message, "2 320");
    }
}
