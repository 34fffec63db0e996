//! The verb registry. Initialized once as a `const` table and never
//! mutated, mirroring the SMTP engine's registry.

use crate::machine::VerbMachine;
use crate::verbs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Capa,
    Stls,
    Apop,
    Stat,
    Rset,
    Noop,
    Quit,
}

impl Verb {
    /// `STLS` may not be reissued once the session is already encrypted.
    pub fn tls_excluded(self) -> bool {
        matches!(self, Verb::Stls)
    }

    pub fn new_machine(self) -> Box<dyn VerbMachine> {
        match self {
            Verb::Capa => Box::new(verbs::capa::CapaMachine::default()),
            Verb::Stls => Box::new(verbs::stls::StlsMachine::default()),
            Verb::Apop => Box::new(verbs::apop::ApopMachine::default()),
            Verb::Stat => Box::new(verbs::stat::StatMachine),
            Verb::Rset => Box::new(verbs::simple::SimpleMachine::rset()),
            Verb::Noop => Box::new(verbs::simple::SimpleMachine::noop()),
            Verb::Quit => Box::new(verbs::simple::SimpleMachine::quit()),
        }
    }
}

/// `USER`/`PASS` are deliberately absent: the original's `UserRequest`
/// dispatches on a SASL-style mechanism name rather than implementing
/// classic RFC 1939 `USER`/`PASS`, and never wires that dispatch to a
/// working client flow either -- there's nothing coherent to expose here.
/// `STAT` is present despite having no registered verb class upstream:
/// `StatEvent` is defined there, and RFC 1939 mandates the verb.
pub const VERB_REGISTRY: &[(&str, Verb)] = &[
    ("CAPA", Verb::Capa),
    ("STLS", Verb::Stls),
    ("APOP", Verb::Apop),
    ("STAT", Verb::Stat),
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
        assert_eq!(lookup("capa"), Some(Verb::Capa));
        assert_eq!(lookup("QUIT"), Some(Verb::Quit));
    }

    #[test]
    fn rejects_unknown_verbs() {
        assert_eq!(lookup("USER"), None);
        assert_eq!(lookup("BLAH"), None);
    }
}
