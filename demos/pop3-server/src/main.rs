//! A toy POP3 server: greets with an APOP challenge, authenticates a single
//! hardcoded mailbox, and reports a fixed two-message maildrop. Adapted to
//! the blocking `Transport` the sans-I/O engines are driven through here.

use std::net::TcpListener;
use std::thread;

use log::{error, info};
use mailproto_core::BoolAcceptReject;
use mailproto_transport::blocking::TcpTransport;
use pop3_proto::{Server, ServerConfig, ServerHandler, apop_hash};
use pop3_types::event::{ApopAuthArgs, ApopChallengeArgs, LockMaildropArgs, MaildropStat, StlsArgs};

const DEMO_UID: &str = "mrose";
const DEMO_PWD: &str = "tanstaaf";
const DEMO_STAT: MaildropStat = MaildropStat { count: 2, octets: 320 };

struct DemoHandler {
    challenge: String,
}

impl ServerHandler for DemoHandler {
    fn on_apop_challenge(&mut self, event: &mut BoolAcceptReject<ApopChallengeArgs>) {
        event.args.challenge = Some(self.challenge.clone());
        event.accept();
    }

    fn on_stls(&mut self, event: &mut BoolAcceptReject<StlsArgs>) {
        event.accept();
    }

    fn on_apop_auth(&mut self, event: &mut BoolAcceptReject<ApopAuthArgs>) {
        let args = &event.args;
        let expected = apop_hash(&args.challenge, DEMO_PWD);
        if args.uid == DEMO_UID && args.digest == expected {
            event.accept();
        } else {
            event.reject(None);
        }
    }

    fn on_lock_maildrop(&mut self, event: &mut BoolAcceptReject<LockMaildropArgs>) {
        info!("locking maildrop {}", event.args.maildrop);
        event.args.stat = Some(DEMO_STAT);
        event.accept();
    }
}

fn main() {
    env_logger::init();
    let addr = std::env::args().nth(1).unwrap_or_else(|| "127.0.0.1:1110".to_string());
    let listener = TcpListener::bind(&addr).unwrap_or_else(|e| panic!("could not bind to {addr}: {e}"));
    info!("listening on {addr}");

    for (n, stream) in listener.incoming().enumerate() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                error!("accept failed: {e}");
                continue;
            }
        };
        thread::spawn(move || {
            let transport = TcpTransport::from_stream(stream);
            let config = ServerConfig {
                hostname: "mailproto-demo".to_string(),
                ..Default::default()
            };
            let mut server = Server::new(transport, config);
            // Each connection gets a distinct challenge so APOP digests never repeat.
            let mut handler = DemoHandler { challenge: format!("<{n}.mailproto-demo@localhost>") };
            let reason = server.run(&mut handler);
            info!("connection closed: {reason}");
        });
    }
}
