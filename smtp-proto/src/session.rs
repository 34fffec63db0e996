//! Per-connection server state.

use std::collections::BTreeMap;

/// Host-supplied server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Advertised in the greeting and HELO/EHLO replies. Must be US-ASCII
    /// with no CR/LF; the host is trusted to have validated this.
    pub hostname: String,
    /// When true (the default), reject parameters the RFC forbids on
    /// `RSET`/`NOOP`/`QUIT`, reject a second `HELO`, etc.
    pub pedantic: bool,
    /// Base ESMTP feature map amended per-session by `EhloAccept`.
    pub esmtp_features: BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            pedantic: true,
            esmtp_features: BTreeMap::new(),
        }
    }
}

/// The mutable state a server connection accumulates across requests.
#[derive(Debug, Clone)]
pub struct ServerSession {
    pub config: ServerConfig,
    pub tls: bool,
    pub client_hostname: Option<String>,
    pub auth_uid: Option<String>,
    pub mail_from: Option<String>,
    pub rcpt_to: Vec<String>,
}

impl ServerSession {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            tls: false,
            client_hostname: None,
            auth_uid: None,
            mail_from: None,
            rcpt_to: Vec::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_uid.is_some()
    }

    /// `RSET`, and the post-DATA state reset: clears the mail transaction,
    /// keeps `client_hostname`/`auth_uid`/`tls`.
    pub fn reset_mail_transaction(&mut self) {
        self.mail_from = None;
        self.rcpt_to.clear();
    }

    /// STARTTLS/STLS completion: the peer must re-issue HELO/EHLO.
    pub fn reset_after_starttls(&mut self) {
        self.client_hostname = None;
    }
}
