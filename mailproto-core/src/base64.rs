//! Thin `base64` wrapper over string pairs, used by the AUTH mechanism
//! plugins (PLAIN, LOGIN) to encode/decode challenge and response blobs.

use base64::{Engine, engine::general_purpose::STANDARD};

pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s.trim_end_matches(['\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips() {
        let encoded = encode(b"\0Zaphod\0Beeblebrox");
        assert_eq!(encoded, "AHphcGhvZABiZWVibGVicm94");
        assert_eq!(decode(&encoded).unwrap(), b"\0Zaphod\0Beeblebrox");
    }
}
