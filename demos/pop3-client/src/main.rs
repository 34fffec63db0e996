//! A toy POP3 client: connects, authenticates with APOP, lists the
//! capability set and the maildrop's `STAT`, then quits. Modeled on the
//! teacher's `assets/demos/tokio-client`, adapted to the blocking
//! `Transport` the sans-I/O engines are driven through here.

use mailproto_transport::blocking::TcpTransport;
use pop3_proto::Client;

// Poor human's terminal color support.
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:1110".to_string());
    let uid = args.next().unwrap_or_else(|| "mrose".to_string());
    let pwd = args.next().unwrap_or_else(|| "tanstaaf".to_string());

    let transport = TcpTransport::connect(&addr).unwrap_or_else(|e| panic!("could not connect to {addr}: {e}"));
    let mut client = Client::new(transport);

    let greeting = client.read_greeting().expect("no greeting");
    println!("{BLUE}S: {}{RESET}", greeting.message);

    let capa = client.capa().expect("CAPA rejected");
    println!("{BLUE}S: capabilities: {:?}{RESET}", capa.capabilities);

    let authed = client.apop(&uid, &pwd, &greeting).expect("APOP rejected");
    println!("{BLUE}S: {}{RESET}", authed.message);

    let stat = client.stat().expect("STAT rejected");
    println!("{BLUE}S: {} messages, {} octets{RESET}", stat.count, stat.octets);

    client.quit().expect("QUIT rejected");
}
