//! Server-side semantic decision events.
//!
//! Every verb that needs a host decision yields one of these. They wrap
//! [`mailproto_core::AcceptReject`] with verb-specific `args`; the host
//! mutates `args` (to amend EHLO's feature map, or to append `EXPN`/`VRFY`
//! mailboxes) and then calls `.accept()` or `.reject(code, message)` exactly
//! once before the state machine is stepped again.

use std::collections::{BTreeMap, BTreeSet};

use mailproto_core::AcceptReject;

use crate::auth::Credentials;

#[derive(Debug, Clone, Default)]
pub struct GreetingArgs;

#[derive(Debug, Clone)]
pub struct HeloArgs {
    pub domain: String,
}

/// The host may add to or remove from `features` and `auth_mechanisms`
/// before accepting; whatever remains is what gets advertised in the
/// multi-line `250` reply.
#[derive(Debug, Clone)]
pub struct EhloArgs {
    pub domain: String,
    pub features: BTreeMap<String, String>,
    pub auth_mechanisms: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct StartTlsArgs;

#[derive(Debug, Clone)]
pub struct AuthArgs {
    pub mechanism: String,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct MailboxQueryArgs {
    pub argtext: String,
    pub mailboxes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MailFromArgs {
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct RcptToArgs {
    pub address: String,
}

/// DATA completion: the fully de-stuffed body, one entry per line including
/// its terminator, exactly as received from the peer.
#[derive(Debug, Clone)]
pub struct DataArgs {
    pub mail_from: String,
    pub rcpt_to: Vec<String>,
    pub data: Vec<Vec<u8>>,
}

/// The events a server-side request state machine can yield.
#[derive(Debug)]
pub enum Event {
    GreetingAccept(AcceptReject<GreetingArgs>),
    HeloAccept(AcceptReject<HeloArgs>),
    EhloAccept(AcceptReject<EhloArgs>),
    StartTlsAccept(AcceptReject<StartTlsArgs>),
    /// Signal to the transport that the next bytes must be encrypted;
    /// raised after the go-ahead reply has been flushed. Not an
    /// `AcceptReject` — there is nothing to accept or reject, only to act
    /// on.
    StartTlsBegin,
    Auth(AcceptReject<AuthArgs>),
    Expn(AcceptReject<MailboxQueryArgs>),
    Vrfy(AcceptReject<MailboxQueryArgs>),
    MailFrom(AcceptReject<MailFromArgs>),
    RcptTo(AcceptReject<RcptToArgs>),
    Complete(AcceptReject<DataArgs>),
}
