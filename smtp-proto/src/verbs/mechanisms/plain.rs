//! `AUTH PLAIN` (RFC 4616), both the single-line and two-step forms.

/// Decode a PLAIN blob (`\0authcid\0passwd`, the `authzid` field ignored)
/// into `(uid, pwd)`. `None` on anything but exactly three NUL-separated
/// fields.
pub fn decode_blob(blob: &[u8]) -> Option<(String, String)> {
    let parts: Vec<&[u8]> = blob.split(|&b| b == 0).collect();
    let [_authzid, authcid, passwd] = parts.as_slice() else {
        return None;
    };
    let uid = String::from_utf8(authcid.to_vec()).ok()?;
    let pwd = String::from_utf8(passwd.to_vec()).ok()?;
    Some((uid, pwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_blob() {
        let blob = b"\0Zaphod\0Beeblebrox";
        assert_eq!(
            decode_blob(blob),
            Some(("Zaphod".to_string(), "Beeblebrox".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(decode_blob(b"no nuls here"), None);
        assert_eq!(decode_blob(b"\0only-two"), None);
    }
}
