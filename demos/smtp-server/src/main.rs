//! A toy SMTP server: accepts connections on the given address, authenticates
//! against a single hardcoded mailbox, and accepts any mail for delivery,
//! logging each message's envelope and body to stdout instead of storing it
//! anywhere. Adapted to the blocking `Transport` the sans-I/O engines are
//! driven through here.

use std::net::TcpListener;
use std::thread;

use log::{error, info};
use mailproto_core::AcceptReject;
use mailproto_transport::blocking::TcpTransport;
use smtp_proto::{Server, ServerConfig, ServerHandler};
use smtp_types::event::{AuthArgs, DataArgs, MailFromArgs, RcptToArgs, StartTlsArgs};

// Poor human's terminal color support.
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

const DEMO_UID: &str = "mrose";
const DEMO_PWD: &str = "hunter2";

struct DemoHandler;

impl ServerHandler for DemoHandler {
    fn on_starttls(&mut self, event: &mut AcceptReject<StartTlsArgs>) {
        event.accept();
    }

    fn on_auth(&mut self, event: &mut AcceptReject<AuthArgs>) {
        let creds = &event.args.credentials;
        if creds.uid == DEMO_UID && creds.pwd.declassify().as_str() == DEMO_PWD {
            event.accept();
        } else {
            event.reject(None, None);
        }
    }

    fn on_mail_from(&mut self, event: &mut AcceptReject<MailFromArgs>) {
        info!("MAIL FROM:<{}>", event.args.address);
        event.accept();
    }

    fn on_rcpt_to(&mut self, event: &mut AcceptReject<RcptToArgs>) {
        info!("RCPT TO:<{}>", event.args.address);
        event.accept();
    }

    fn on_complete(&mut self, event: &mut AcceptReject<DataArgs>) {
        println!("{BLUE}-- new message --{RESET}");
        println!("from: {}", event.args.mail_from);
        for rcpt in &event.args.rcpt_to {
            println!("to:   {rcpt}");
        }
        for line in &event.args.data {
            print!("{}", String::from_utf8_lossy(line));
        }
        event.accept();
    }
}

fn main() {
    env_logger::init();
    let addr = std::env::args().nth(1).unwrap_or_else(|| "127.0.0.1:2525".to_string());
    let listener = TcpListener::bind(&addr).unwrap_or_else(|e| panic!("could not bind to {addr}: {e}"));
    info!("listening on {addr}");

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                error!("accept failed: {e}");
                continue;
            }
        };
        thread::spawn(move || {
            let transport = TcpTransport::from_stream(stream);
            let config = ServerConfig { hostname: "mailproto-demo".to_string(), ..Default::default() };
            let mut server = Server::new(transport, config);
            let reason = server.run(&mut DemoHandler);
            info!("connection closed: {reason}");
        });
    }
}
