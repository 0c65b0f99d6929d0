//! PKCE (Proof Key for Code Exchange) pair generation.
//!
//! Airtable's token endpoint requires a `code_verifier`; the other providers
//! rely on the client secret alone.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore as _;
use sha2::{Digest, Sha256};

/// Generate a PKCE `(code_verifier, code_challenge_s256)` pair using SHA-256.
#[must_use]
pub fn generate_pkce() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let verifier = URL_SAFE_NO_PAD.encode(bytes);
    let digest = Sha256::digest(verifier.as_bytes());
    let challenge = URL_SAFE_NO_PAD.encode(digest.as_slice());
    (verifier, challenge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_is_base64url() {
        let (verifier, _) = generate_pkce();
        assert!(
            verifier
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        );
        assert!(!verifier.contains('='));
    }

    #[test]
    fn test_challenge_differs_from_verifier() {
        let (verifier, challenge) = generate_pkce();
        assert_ne!(verifier, challenge);
    }

    #[test]
    fn test_challenge_is_s256_of_verifier() {
        let (verifier, challenge) = generate_pkce();
        let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        assert_eq!(challenge, expected);
    }

    #[test]
    fn test_two_calls_produce_different_values() {
        let (v1, c1) = generate_pkce();
        let (v2, c2) = generate_pkce();
        assert_ne!(v1, v2);
        assert_ne!(c1, c2);
    }
}
