//! Host-visible event dispatch, the POP3 counterpart of `smtp-proto`'s
//! `ServerHandler`.

use mailproto_core::BoolAcceptReject;
use pop3_types::event::{
    ApopAuthArgs, ApopChallengeArgs, Event, GreetingArgs, LockMaildropArgs, StlsArgs, UnlockMaildropArgs,
};

/// One method per [`Event`] variant that needs a host decision.
/// `StlsBegin` is not dispatched here: it carries no decision, the driver
/// acts on it directly.
///
/// `ApopChallenge` and greeting-accept auto-accept by default (no challenge
/// offered, connection always welcomed); `STLS`, `APOP` authentication and
/// maildrop locking have no default and must be supplied by the host.
/// `on_unlock_maildrop` also auto-accepts by default: `pop3-proto` never
/// raises this event itself, so a host with no unlock bookkeeping of its
/// own never has to implement it.
pub trait ServerHandler {
    fn on_apop_challenge(&mut self, event: &mut BoolAcceptReject<ApopChallengeArgs>) {
        event.accept();
    }

    fn on_greeting(&mut self, event: &mut BoolAcceptReject<GreetingArgs>) {
        event.accept();
    }

    fn on_stls(&mut self, event: &mut BoolAcceptReject<StlsArgs>);

    fn on_apop_auth(&mut self, event: &mut BoolAcceptReject<ApopAuthArgs>);

    fn on_lock_maildrop(&mut self, event: &mut BoolAcceptReject<LockMaildropArgs>);

    fn on_unlock_maildrop(&mut self, event: &mut BoolAcceptReject<UnlockMaildropArgs>) {
        event.accept();
    }
}

/// Route `event` to the matching `on_*` method, mutating it in place so the
/// caller can resolve it once this returns.
pub fn dispatch(handler: &mut dyn ServerHandler, event: &mut Event) {
    match event {
        Event::ApopChallenge(e) => handler.on_apop_challenge(e),
        Event::GreetingAccept(e) => handler.on_greeting(e),
        Event::StlsAccept(e) => handler.on_stls(e),
        Event::StlsBegin => {}
        Event::ApopAuth(e) => handler.on_apop_auth(e),
        Event::LockMaildrop(e) => handler.on_lock_maildrop(e),
        Event::UnlockMaildrop(e) => handler.on_unlock_maildrop(e),
    }
}
