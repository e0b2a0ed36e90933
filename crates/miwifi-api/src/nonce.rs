// Login nonce and password digest
//
// The router's login challenge: a per-client nonce mixed into a two-round
// SHA-1 digest of the password and a fixed device key.

use rand::Rng;
use sha1::{Digest, Sha1};

/// Static key shared by every MiWiFi firmware for login digests.
const DEVICE_KEY: &str = "a2ffa5c9be07488bbb04a3a47d3c5f6a";

/// Type tag the router expects at the start of every nonce.
const NONCE_TYPE: u8 = 0;

/// Build a login nonce: `0_{identity}_{unix_secs}_{random}`.
///
/// The random part is drawn from `[0, 10000)`.
pub fn generate_nonce(identity: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let random: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{NONCE_TYPE}_{identity}_{timestamp}_{random}")
}

/// Digest a password for the login request.
///
/// `sha1(nonce ‖ hex(sha1(password ‖ DEVICE_KEY)))`, hex-encoded.
pub fn hash_password(password: &str, nonce: &str) -> String {
    let salted = sha1_hex(&[password.as_bytes(), DEVICE_KEY.as_bytes()]);
    sha1_hex(&[nonce.as_bytes(), salted.as_bytes()])
}

fn sha1_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const NONCE: &str = "0_00:11:22:33:44:55_1600000000_1234";

    #[test]
    fn hash_matches_known_vector() {
        assert_eq!(
            hash_password("admin", NONCE),
            "beced8f23f51c1563cb052d7c92e9b12f8754f35"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_password("secret", NONCE), hash_password("secret", NONCE));
    }

    #[test]
    fn hash_depends_on_password_and_nonce() {
        let base = hash_password("admin", NONCE);
        assert_eq!(
            hash_password("other", NONCE),
            "35bb8d11c55c2a9350375860c92c6a4d570c2f2b"
        );
        assert_ne!(base, hash_password("other", NONCE));
        assert_ne!(base, hash_password("admin", "0_00:11:22:33:44:55_1600000000_1235"));
    }

    #[test]
    fn nonce_has_expected_shape() {
        let nonce = generate_nonce("aa:bb:cc:dd:ee:ff");
        let parts: Vec<&str> = nonce.split('_').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "0");
        assert_eq!(parts[1], "aa:bb:cc:dd:ee:ff");
        assert!(parts[2].parse::<i64>().unwrap() > 1_600_000_000);
        assert!(parts[3].parse::<u32>().unwrap() < 10_000);
    }

    #[test]
    fn nonces_differ_between_calls() {
        // Same second, so uniqueness rests on the random part; retry a few
        // times to make a 1-in-10000 collision irrelevant.
        let distinct = (0..5).any(|_| generate_nonce("id") != generate_nonce("id"));
        assert!(distinct);
    }
}
