//! `EHLO`: builds the feature map and advertised AUTH mechanism
//! set, lets the host amend both via `EhloAccept`, then emits the
//! multi-line `250` reply.

use mailproto_core::{AcceptReject, Step};
use smtp_types::event::{EhloArgs, Event};
use smtp_types::response::Response;

use crate::encode::fold_auth_mechanisms;
use crate::machine::{Emit, Resume, VerbMachine, VerbStep};
use crate::session::ServerSession;
use crate::verbs::mechanisms::registry::available_mechanisms;

#[derive(Debug, Default)]
enum State {
    #[default]
    Init,
    Decided,
}

#[derive(Debug, Default)]
pub struct EhloMachine(State);

impl VerbMachine for EhloMachine {
    fn step(&mut self, session: &mut ServerSession, input: Resume<'_>) -> VerbStep {
        match (&self.0, input) {
            (State::Init, Resume::Start(argtext)) => {
                let domain = argtext.trim();
                if domain.is_empty() {
                    return Step::Done(Response::new(501, vec!["syntax: EHLO hostname".into()]));
                }

                let mut features = session.config.esmtp_features.clone();
                features.entry("8BITMIME".to_string()).or_default();
                features.entry("PIPELINING".to_string()).or_default();
                if !session.tls {
                    features.entry("STARTTLS".to_string()).or_default();
                }

                let auth_mechanisms = available_mechanisms(session.tls)
                    .into_iter()
                    .map(|m| m.to_string())
                    .collect();

                let event = AcceptReject::new(
                    EhloArgs {
                        domain: domain.to_string(),
                        features,
                        auth_mechanisms,
                    },
                    (250, "OK".to_string()),
                    (550, "EHLO rejected".to_string()),
                );
                self.0 = State::Decided;
                Step::Yield(Emit::Host(Event::EhloAccept(event)))
            }
            (State::Decided, Resume::Decided(Event::EhloAccept(event))) => {
                let args = event.args.clone();
                let outcome = event.resolve();
                if !outcome.is_success() {
                    return Step::Done(Response::new(outcome.code(), vec![outcome.message().to_string()]));
                }
                session.client_hostname = Some(args.domain);

                let mut lines = vec![session.config.hostname.clone()];
                lines.extend(fold_auth_mechanisms(&args.auth_mechanisms));
                for (name, params) in &args.features {
                    if params.is_empty() {
                        lines.push(name.clone());
                    } else {
                        lines.push(format!("{name} {params}"));
                    }
                }
                Step::Done(Response::new(250, lines))
            }
            _ => Step::Fail(mailproto_core::Closed::internal_error()),
        }
    }
}
