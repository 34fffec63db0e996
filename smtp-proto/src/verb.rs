//! The verb registry.
//!
//! Initialized once as a `const` table and never mutated; `lookup` is a
//! linear scan over a dozen entries, fast enough that no hash map is worth
//! the complexity.

use crate::machine::VerbMachine;
use crate::verbs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Helo,
    Ehlo,
    StartTls,
    Auth,
    Expn,
    Vrfy,
    MailFrom,
    RcptTo,
    Data,
    Rset,
    Noop,
    Quit,
}

impl Verb {
    /// Whether this verb may only be used once TLS is active. `STARTTLS`
    /// itself is excluded from ever running once already-TLS (handled
    /// inside its own machine, not here); AUTH's per-mechanism TLS
    /// requirement is handled inside the AUTH machine since it depends on
    /// the chosen mechanism, not the verb itself.
    pub fn tls_required(self) -> bool {
        false
    }

    /// `STARTTLS` may not be reissued once the session is already
    /// encrypted.
    pub fn tls_excluded(self) -> bool {
        matches!(self, Verb::StartTls)
    }

    pub fn new_machine(self) -> Box<dyn VerbMachine> {
        match self {
            Verb::Helo => Box::new(verbs::helo::HeloMachine::default()),
            Verb::Ehlo => Box::new(verbs::ehlo::EhloMachine::default()),
            Verb::StartTls => Box::new(verbs::starttls::StartTlsMachine::default()),
            Verb::Auth => Box::new(verbs::auth::AuthMachine::default()),
            Verb::Expn => Box::new(verbs::expn_vrfy::MailboxQueryMachine::expn()),
            Verb::Vrfy => Box::new(verbs::expn_vrfy::MailboxQueryMachine::vrfy()),
            Verb::MailFrom => Box::new(verbs::mail_from::MailFromMachine::default()),
            Verb::RcptTo => Box::new(verbs::rcpt_to::RcptToMachine::default()),
            Verb::Data => Box::new(verbs::data::DataMachine::default()),
            Verb::Rset => Box::new(verbs::simple::SimpleMachine::rset()),
            Verb::Noop => Box::new(verbs::simple::SimpleMachine::noop()),
            Verb::Quit => Box::new(verbs::simple::SimpleMachine::quit()),
        }
    }
}

/// `(verb word, variant)`. `MAIL`/`RCPT` are registered under their verb
/// word alone; `FROM:`/`TO:` live in the argument text, matched by each
/// machine's own parser.
pub const VERB_REGISTRY: &[(&str, Verb)] = &[
    ("HELO", Verb::Helo),
    ("EHLO", Verb::Ehlo),
    ("STARTTLS", Verb::StartTls),
    ("AUTH", Verb::Auth),
    ("EXPN", Verb::Expn),
    ("VRFY", Verb::Vrfy),
    ("MAIL", Verb::MailFrom),
    ("RCPT", Verb::RcptTo),
    ("DATA", Verb::Data),
    ("RSET", Verb::Rset),
    ("NOOP", Verb::Noop),
    ("QUIT", Verb::Quit),
];

pub fn lookup(word: &str) -> Option<Verb> {
    VERB_REGISTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, verb)| *verb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_verbs_case_insensitively() {
        assert_eq!(lookup("mail"), Some(Verb::MailFrom));
        assert_eq!(lookup("QUIT"), Some(Verb::Quit));
    }

    #[test]
    fn rejects_unknown_verbs() {
        assert_eq!(lookup("BLAH"), None);
    }
}
