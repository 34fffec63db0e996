//! The `AcceptReject` event harness.
//!
//! Every semantic decision point (greeting, HELO/EHLO, STARTTLS, AUTH, EXPN,
//! VRFY, MAIL FROM, RCPT TO, DATA-complete, APOP, maildrop lock, ...) is
//! represented the same way: a bundle of request-specific `args`, a default
//! success code/message, a default failure code/message, and a decision the
//! host must make exactly once by calling [`AcceptReject::accept`] or
//! [`AcceptReject::reject`] before the state machine is stepped again.

use log::warn;

/// The final disposition of an [`AcceptReject`] event, ready to be turned
/// into a reply line by the protocol's response encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { code: u16, message: String },
    Rejected { code: u16, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    pub fn code(&self) -> u16 {
        match self {
            Outcome::Accepted { code, .. } | Outcome::Rejected { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Accepted { message, .. } | Outcome::Rejected { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone)]
enum Decision {
    Accept,
    Reject { code: u16, message: String },
}

/// A semantic decision point carrying request-specific `args`.
///
/// `reject`'s `code`/`message` overrides are validated against the error
/// handling design: a code outside 400-599, or a message containing CR/LF,
/// is logged and discarded in favor of the default failure text rather than
/// treated as an error in its own right.
#[derive(Debug, Clone)]
pub struct AcceptReject<Args> {
    pub args: Args,
    default_success: (u16, String),
    default_failure: (u16, String),
    decision: Option<Decision>,
}

impl<Args> AcceptReject<Args> {
    pub fn new(
        args: Args,
        default_success: (u16, impl Into<String>),
        default_failure: (u16, impl Into<String>),
    ) -> Self {
        Self {
            args,
            default_success: (default_success.0, default_success.1.into()),
            default_failure: (default_failure.0, default_failure.1.into()),
            decision: None,
        }
    }

    pub fn accept(&mut self) {
        self.decision = Some(Decision::Accept);
    }

    pub fn reject(&mut self, code: Option<u16>, message: Option<&str>) {
        let (mut final_code, mut final_message) = self.default_failure.clone();
        if let Some(code) = code {
            if (400..=599).contains(&code) {
                final_code = code;
            } else {
                warn!("reject() called with out-of-range code {code}, keeping default {final_code}");
            }
        }
        if let Some(message) = message {
            if message.contains('\r') || message.contains('\n') {
                warn!("reject() called with CR/LF in message, keeping default text");
            } else {
                final_message = message.to_string();
            }
        }
        self.decision = Some(Decision::Reject {
            code: final_code,
            message: final_message,
        });
    }

    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }

    /// Resolve the event's final outcome. Panics if neither `accept` nor
    /// `reject` was called; the driver must never step a coroutine past a
    /// pending `AcceptReject`.
    pub fn resolve(&self) -> Outcome {
        match &self.decision {
            Some(Decision::Accept) => Outcome::Accepted {
                code: self.default_success.0,
                message: self.default_success.1.clone(),
            },
            Some(Decision::Reject { code, message }) => Outcome::Rejected {
                code: *code,
                message: message.clone(),
            },
            None => panic!("AcceptReject event stepped past before accept()/reject() was called"),
        }
    }
}

/// The final disposition of a [`BoolAcceptReject`] event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolOutcome {
    Accepted { message: String },
    Rejected { message: String },
}

impl BoolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BoolOutcome::Accepted { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            BoolOutcome::Accepted { message } | BoolOutcome::Rejected { message } => message,
        }
    }
}

#[derive(Debug, Clone)]
enum BoolDecision {
    Accept,
    Reject { message: String },
}

/// The POP3-flavored counterpart of [`AcceptReject`]: POP3 replies carry no
/// numeric code, only `+OK`/`-ERR` plus free text, so there is nothing here
/// to validate against a 400-599 range. `reject`'s message override is still
/// discarded (with a logged warning) if it contains CR/LF.
#[derive(Debug, Clone)]
pub struct BoolAcceptReject<Args> {
    pub args: Args,
    default_success: String,
    default_failure: String,
    decision: Option<BoolDecision>,
}

impl<Args> BoolAcceptReject<Args> {
    pub fn new(
        args: Args,
        default_success: impl Into<String>,
        default_failure: impl Into<String>,
    ) -> Self {
        Self {
            args,
            default_success: default_success.into(),
            default_failure: default_failure.into(),
            decision: None,
        }
    }

    pub fn accept(&mut self) {
        self.decision = Some(BoolDecision::Accept);
    }

    pub fn reject(&mut self, message: Option<&str>) {
        let mut final_message = self.default_failure.clone();
        if let Some(message) = message {
            if message.contains('\r') || message.contains('\n') {
                warn!("reject() called with CR/LF in message, keeping default text");
            } else {
                final_message = message.to_string();
            }
        }
        self.decision = Some(BoolDecision::Reject { message: final_message });
    }

    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }

    /// Resolve the event's final outcome. Panics if neither `accept` nor
    /// `reject` was called; the driver must never step a machine past a
    /// pending `BoolAcceptReject`.
    pub fn resolve(&self) -> BoolOutcome {
        match &self.decision {
            Some(BoolDecision::Accept) => BoolOutcome::Accepted {
                message: self.default_success.clone(),
            },
            Some(BoolDecision::Reject { message }) => BoolOutcome::Rejected {
                message: message.clone(),
            },
            None => panic!("BoolAcceptReject event stepped past before accept()/reject() was called"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_resolves_to_default_success() {
        let mut event = AcceptReject::new((), (250, "OK"), (550, "denied"));
        event.accept();
        assert_eq!(
            event.resolve(),
            Outcome::Accepted {
                code: 250,
                message: "OK".into()
            }
        );
    }

    #[test]
    fn reject_with_valid_override() {
        let mut event = AcceptReject::new((), (250, "OK"), (550, "denied"));
        event.reject(Some(451), Some("try again later"));
        assert_eq!(
            event.resolve(),
            Outcome::Rejected {
                code: 451,
                message: "try again later".into()
            }
        );
    }

    #[test]
    fn reject_with_invalid_code_falls_back_to_default() {
        let mut event = AcceptReject::new((), (250, "OK"), (550, "denied"));
        event.reject(Some(200), None);
        assert_eq!(event.resolve().code(), 550);
    }

    #[test]
    fn reject_with_crlf_in_message_falls_back_to_default() {
        let mut event = AcceptReject::new((), (250, "OK"), (550, "denied"));
        event.reject(None, Some("evil\r\ninjected"));
        assert_eq!(event.resolve().message(), "denied");
    }

    #[test]
    #[should_panic]
    fn resolve_before_decision_panics() {
        let event: AcceptReject<()> = AcceptReject::new((), (250, "OK"), (550, "denied"));
        event.resolve();
    }

    #[test]
    fn bool_accept_resolves_to_default_success() {
        let mut event = BoolAcceptReject::new((), "ready", "denied");
        event.accept();
        assert_eq!(event.resolve(), BoolOutcome::Accepted { message: "ready".into() });
    }

    #[test]
    fn bool_reject_with_valid_override() {
        let mut event = BoolAcceptReject::new((), "ready", "denied");
        event.reject(Some("try again"));
        assert_eq!(event.resolve(), BoolOutcome::Rejected { message: "try again".into() });
    }

    #[test]
    fn bool_reject_with_crlf_falls_back_to_default() {
        let mut event = BoolAcceptReject::new((), "ready", "denied");
        event.reject(Some("evil\r\ninjected"));
        assert_eq!(event.resolve().message(), "denied");
    }

    #[test]
    #[should_panic]
    fn bool_resolve_before_decision_panics() {
        let event: BoolAcceptReject<()> = BoolAcceptReject::new((), "ready", "denied");
        event.resolve();
    }
}
