//! APOP digest computation (RFC 1939 §7): `md5_hex(challenge || password)`,
//! shared by the client (to send it) and by a host handler (to verify it
//! against a stored password, since the core never sees passwords itself
//! beyond what the event carries).

use md5::{Digest, Md5};

pub fn apop_hash(challenge: &str, pwd: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(challenge.as_bytes());
    hasher.update(pwd.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc1939_example() {
        let digest = apop_hash("<1896.697170952@dbc.mtview.ca.us>", "tanstaaf");
        assert_eq!(digest, "c4c9334bac560ecc979e58001b3e22fb");
    }
}
