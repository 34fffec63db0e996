//! Per-connection server state.

use pop3_types::event::MaildropStat;

/// Host-supplied server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Advertised nowhere on the wire directly, but used the same way the
    /// SMTP server's hostname is: as a stable identity for logging.
    pub hostname: String,
    /// When true (the default), reject parameters the RFC forbids on
    /// `RSET`/`NOOP`/`QUIT`/`CAPA`/`STLS`.
    pub pedantic: bool,
    /// Capabilities advertised by `CAPA`, beyond `STLS` (added automatically
    /// while not yet TLS).
    pub capabilities: std::collections::BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            pedantic: true,
            capabilities: std::collections::BTreeMap::new(),
        }
    }
}

/// The mutable state a server connection accumulates across requests.
#[derive(Debug, Clone)]
pub struct ServerSession {
    pub config: ServerConfig,
    pub tls: bool,
    pub auth_uid: Option<String>,
    /// Set by the `GREETING`'s `ApopChallenge` event; `None` if the host
    /// declined to issue one, which makes `APOP` permanently fail.
    pub apop_challenge: Option<String>,
    /// Reported by the host when it accepts the `LockMaildrop` event during
    /// `APOP`; `STAT` reads it back rather than asking the host again.
    pub maildrop_stat: Option<MaildropStat>,
}

impl ServerSession {
    pub fn new(config: ServerConfig) -> Self {
        Self { config, tls: false, auth_uid: None, apop_challenge: None, maildrop_stat: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_uid.is_some()
    }
}
