//! Host-visible event dispatch: one `on_<EventName>` method per event.

use mailproto_core::AcceptReject;
use smtp_types::event::{
    AuthArgs, DataArgs, EhloArgs, Event, GreetingArgs, HeloArgs, MailFromArgs, MailboxQueryArgs,
    RcptToArgs, StartTlsArgs,
};

/// One method per [`Event`] variant that needs a host decision.
/// `StartTlsBegin` is not dispatched here: it carries no decision, the
/// driver acts on it directly.
///
/// Greeting/HELO/EHLO auto-accept and EXPN/VRFY auto-reject with 550 by
/// default; AUTH, MAIL FROM, RCPT TO, DATA-complete and STARTTLS-accept
/// have no default and must be supplied by the host.
pub trait ServerHandler {
    fn on_greeting(&mut self, event: &mut AcceptReject<GreetingArgs>) {
        event.accept();
    }

    fn on_helo(&mut self, event: &mut AcceptReject<HeloArgs>) {
        event.accept();
    }

    fn on_ehlo(&mut self, event: &mut AcceptReject<EhloArgs>) {
        event.accept();
    }

    fn on_starttls(&mut self, event: &mut AcceptReject<StartTlsArgs>);

    fn on_auth(&mut self, event: &mut AcceptReject<AuthArgs>);

    fn on_expn(&mut self, event: &mut AcceptReject<MailboxQueryArgs>) {
        event.reject(Some(550), None);
    }

    fn on_vrfy(&mut self, event: &mut AcceptReject<MailboxQueryArgs>) {
        event.reject(Some(550), None);
    }

    fn on_mail_from(&mut self, event: &mut AcceptReject<MailFromArgs>);

    fn on_rcpt_to(&mut self, event: &mut AcceptReject<RcptToArgs>);

    fn on_complete(&mut self, event: &mut AcceptReject<DataArgs>);
}

/// Route `event` to the matching `on_*` method, mutating it in place so the
/// caller can resolve it once this returns.
pub fn dispatch(handler: &mut dyn ServerHandler, event: &mut Event) {
    match event {
        Event::GreetingAccept(e) => handler.on_greeting(e),
        Event::HeloAccept(e) => handler.on_helo(e),
        Event::EhloAccept(e) => handler.on_ehlo(e),
        Event::StartTlsAccept(e) => handler.on_starttls(e),
        Event::StartTlsBegin => {}
        Event::Auth(e) => handler.on_auth(e),
        Event::Expn(e) => handler.on_expn(e),
        Event::Vrfy(e) => handler.on_vrfy(e),
        Event::MailFrom(e) => handler.on_mail_from(e),
        Event::RcptTo(e) => handler.on_rcpt_to(e),
        Event::Complete(e) => handler.on_complete(e),
    }
}
