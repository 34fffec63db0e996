//! A toy SMTP client: connects, EHLOs, authenticates, and sends one message
//! read from stdin to a single recipient. Adapted to the blocking
//! `Transport` the sans-I/O engines are driven through here.

use std::io::Read;

use log::info;
use mailproto_transport::blocking::TcpTransport;
use smtp_proto::Client;

// Poor human's terminal color support.
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:2525".to_string());
    let from = args.next().unwrap_or_else(|| "alice@example.com".to_string());
    let to = args.next().unwrap_or_else(|| "bob@example.com".to_string());

    let mut body = String::new();
    if std::io::stdin().read_to_string(&mut body).is_err() || body.is_empty() {
        body = "Subject: hello\r\n\r\nsent by mailproto-demo-smtp-client\r\n".to_string();
    }

    let transport = TcpTransport::connect(&addr).unwrap_or_else(|e| panic!("could not connect to {addr}: {e}"));
    let mut client = Client::new(transport);

    let greeting = client.read_greeting().expect("no greeting");
    println!("{BLUE}S: {}{RESET}", greeting.message);

    let ehlo = client.ehlo("mailproto-demo").expect("EHLO rejected");
    info!("server features: {:?}", ehlo.features);

    client.mail_from(&from).expect("MAIL FROM rejected");
    client.rcpt_to(&to).expect("RCPT TO rejected");
    let accepted = client.data(body.as_bytes()).expect("DATA rejected");
    println!("{BLUE}S: {}{RESET}", accepted.message);

    client.quit().expect("QUIT rejected");
}
