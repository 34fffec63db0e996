//! Full request/reply trace tests against [`Server::run`], the POP3
//! counterpart of `smtp-proto`'s `tests/end_to_end.rs`.

use std::collections::VecDeque;

use mailproto_core::transport::Transport;
use mailproto_core::BoolAcceptReject;
use pop3_proto::{apop_hash, Server, ServerConfig, ServerHandler};
use pop3_types::event::{ApopAuthArgs, ApopChallengeArgs, LockMaildropArgs, MaildropStat, StlsArgs};

struct ScriptedTransport {
    inbound: VecDeque<Vec<u8>>,
    pub output: Vec<u8>,
}

impl ScriptedTransport {
    fn new(script: &[u8]) -> Self {
        let mut inbound = VecDeque::new();
        inbound.push_back(script.to_vec());
        Self { inbound, output: Vec::new() }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Transport for ScriptedTransport {
    type Error = std::convert::Infallible;

    fn read(&mut self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.inbound.pop_front().unwrap_or_default())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.output.extend_from_slice(data);
        Ok(())
    }

    fn starttls_client(&mut self, _server_hostname: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn starttls_server(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

const DEMO_UID: &str = "mrose";
const DEMO_PWD: &str = "tanstaaf";
const DEMO_CHALLENGE: &str = "<1896.697170952@dbc.mtview.ca.us>";
const DEMO_STAT: MaildropStat = MaildropStat { count: 2, octets: 320 };

struct DemoHandler {
    challenge: Option<&'static str>,
}

impl ServerHandler for DemoHandler {
    fn on_apop_challenge(&mut self, event: &mut BoolAcceptReject<ApopChallengeArgs>) {
        event.args.challenge = self.challenge.map(str::to_string);
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
        event.args.stat = Some(DEMO_STAT);
        event.accept();
    }
}

fn run_script(script: &[u8], handler: &mut DemoHandler) -> String {
    let transport = ScriptedTransport::new(script);
    let config = ServerConfig { hostname: "pop.example".to_string(), ..Default::default() };
    let mut server = Server::new(transport, config);
    let _ = server.run(handler);
    server.transport_mut().output_str()
}

/// S4 — the canonical RFC 1939 §7 APOP exchange: the greeting advertises a
/// fixed challenge, the client sends the matching digest, and the server
/// reports a maildrop stat line.
#[test]
fn s4_apop_full_flow() {
    let digest = apop_hash(DEMO_CHALLENGE, DEMO_PWD);
    let script = format!("APOP {DEMO_UID} {digest}\r\nSTAT\r\nQUIT\r\n");
    let mut handler = DemoHandler { challenge: Some(DEMO_CHALLENGE) };
    let output = run_script(script.as_bytes(), &mut handler);

    assert_eq!(
        output,
        format!(
            "+OK POP3 server ready {DEMO_CHALLENGE}\r\n\
             +OK maildrop has 2 messages (320 octets)\r\n\
             +OK 2 320\r\n\
             +OK Closing connection\r\n"
        )
    );
}

#[test]
fn apop_with_wrong_digest_is_rejected() {
    let script = format!("APOP {DEMO_UID} deadbeefdeadbeefdeadbeefdeadbeef\r\nQUIT\r\n");
    let mut handler = DemoHandler { challenge: Some(DEMO_CHALLENGE) };
    let output = run_script(script.as_bytes(), &mut handler);

    assert!(output.contains("-ERR authentication failed\r\n"));
}

/// No challenge offered (host declines APOP for the session) makes every
/// APOP attempt fail regardless of the digest.
#[test]
fn apop_without_challenge_always_fails() {
    let digest = apop_hash("whatever", DEMO_PWD);
    let script = format!("APOP {DEMO_UID} {digest}\r\nQUIT\r\n");
    let mut handler = DemoHandler { challenge: None };
    let output = run_script(script.as_bytes(), &mut handler);

    assert!(output.starts_with("+OK POP3 server ready\r\n"));
    assert!(output.contains("-ERR authentication failed\r\n"));
}

/// `CAPA` lists `STLS` before TLS is active and drops it after a
/// (fake, in this test) STLS handshake.
#[test]
fn capa_drops_stls_after_handshake() {
    let script = b"CAPA\r\nSTLS\r\nCAPA\r\nQUIT\r\n";
    let mut handler = DemoHandler { challenge: Some(DEMO_CHALLENGE) };
    let output = run_script(script, &mut handler);

    let mut capa_blocks = output.split("+OK Capability list follows\r\n").skip(1);
    let first = capa_blocks.next().unwrap();
    assert!(first.contains("STLS\r\n"));
    let second = capa_blocks.next().unwrap();
    assert!(!second.contains("STLS\r\n"));
}

/// STLS does not re-greet afterward (unlike SMTP's STARTTLS): the next
/// line is answered directly, with no second `+OK POP3 server ready`.
#[test]
fn stls_does_not_re_greet() {
    let script = b"STLS\r\nCAPA\r\nQUIT\r\n";
    let mut handler = DemoHandler { challenge: Some(DEMO_CHALLENGE) };
    let output = run_script(script, &mut handler);

    assert_eq!(output.matches("POP3 server ready").count(), 1);
    assert!(output.contains("+OK Begin TLS negotiation\r\n"));
}

#[test]
fn stat_before_authentication_is_rejected() {
    let script = b"STAT\r\nQUIT\r\n";
    let mut handler = DemoHandler { challenge: Some(DEMO_CHALLENGE) };
    let output = run_script(script, &mut handler);

    assert!(output.contains("-ERR not authenticated\r\n"));
}
