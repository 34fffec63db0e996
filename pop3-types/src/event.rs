//! Server-side semantic decision events for POP3. Each wraps
//! [`mailproto_core::BoolAcceptReject`] with verb-specific
//! `args`; the host mutates `args` and then calls `.accept()` or
//! `.reject(message)` exactly once before the state machine is stepped
//! again.

use mailproto_core::BoolAcceptReject;

/// Host may supply the `<id@host>` challenge to advertise in the greeting;
/// leaving `challenge` `None` disables APOP for the session.
#[derive(Debug, Clone, Default)]
pub struct ApopChallengeArgs {
    pub challenge: Option<String>,
}

/// The resolved challenge (if any) is carried into the greeting text.
#[derive(Debug, Clone, Default)]
pub struct GreetingArgs {
    pub apop_challenge: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StlsArgs;

/// `uid`/`challenge`/`digest` let the host recompute
/// `md5_hex(challenge + password)` against its own credential store and
/// compare to `digest`.
#[derive(Debug, Clone)]
pub struct ApopAuthArgs {
    pub uid: String,
    pub challenge: String,
    pub digest: String,
}

/// A maildrop's message count and total size in octets, reported by the
/// host once it accepts a [`LockMaildropArgs`] event.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaildropStat {
    pub count: u32,
    pub octets: u64,
}

/// Issued once authentication succeeds; the host fills in `stat` before
/// calling `accept()`.
#[derive(Debug, Clone)]
pub struct LockMaildropArgs {
    pub maildrop: String,
    pub stat: Option<MaildropStat>,
}

/// The original's `UnlockMaildropEvent` carries no args ("should this be an
/// accept/reject???" per its own docstring); kept empty here too.
#[derive(Debug, Clone, Default)]
pub struct UnlockMaildropArgs {
    pub maildrop: String,
}

/// The events a server-side request state machine can yield.
#[derive(Debug)]
pub enum Event {
    ApopChallenge(BoolAcceptReject<ApopChallengeArgs>),
    GreetingAccept(BoolAcceptReject<GreetingArgs>),
    StlsAccept(BoolAcceptReject<StlsArgs>),
    /// Signal to the transport that the next bytes must be encrypted; not
    /// an accept/reject decision, only something to act on.
    StlsBegin,
    ApopAuth(BoolAcceptReject<ApopAuthArgs>),
    LockMaildrop(BoolAcceptReject<LockMaildropArgs>),
    /// Never constructed by `pop3-proto` itself: the original declares this
    /// event but never issues it (no unlock-on-disconnect policy was ever
    /// specified upstream). Kept as a reachable variant so a host that
    /// wants to drive its own unlock bookkeeping through this enum can
    /// match on it without the type being a dead end.
    UnlockMaildrop(BoolAcceptReject<UnlockMaildropArgs>),
}
