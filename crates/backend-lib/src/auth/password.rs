// ============================
// axelsub-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! A derived secret is `hex(hash) + "." + hex(salt)`: a fresh 16-byte salt
//! per derivation and 64 bytes of scrypt output with fixed cost
//! parameters. The dot never appears in the hex alphabet, so the two
//! halves split unambiguously.

use rand::RngCore;
use scrypt::Params;
use zeroize::Zeroize;

use crate::error::AppError;

// scrypt cost parameters, fixed for every secret ever derived: N = 2^14,
// r = 8, p = 1. Verification recomputes with these same values, so they
// must not change without a migration for existing secrets.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Derived hash length in bytes
const HASH_LEN: usize = 64;

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Separator between the hex-encoded hash and salt halves
const SEPARATOR: char = '.';

fn cost_params() -> Params {
    Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, HASH_LEN).expect("fixed scrypt parameters")
}

/// Derive a credential secret from a plaintext password.
///
/// Non-deterministic: every call draws a fresh salt, so two derivations
/// of the same plaintext differ.
pub fn derive_secret(plain: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    scrypt::scrypt(plain.as_bytes(), &salt, &cost_params(), &mut hash)
        .map_err(|e| AppError::Internal(format!("scrypt derivation failed: {e}")))?;

    Ok(format!(
        "{}{SEPARATOR}{}",
        hex::encode(hash),
        hex::encode(salt)
    ))
}

/// Derive a credential secret and scrub the plaintext buffer
pub fn derive_secret_scrub(plain: &mut String) -> Result<String, AppError> {
    let secret = derive_secret(plain)?;
    plain.zeroize();
    Ok(secret)
}

/// Verify a plaintext password against a stored secret.
///
/// A well-formed mismatch is `Ok(false)`; a secret that does not split
/// into two hex halves is a decode error, since it can only mean the
/// stored value was corrupted.
pub fn verify_secret(plain: &str, secret: &str) -> Result<bool, AppError> {
    let mut parts = secret.split(SEPARATOR);
    let (hash_hex, salt_hex) = match (parts.next(), parts.next(), parts.next()) {
        (Some(hash), Some(salt), None) => (hash, salt),
        _ => {
            return Err(AppError::SecretDecode(
                "expected two dot-separated fields".to_string(),
            ))
        }
    };

    let stored_hash =
        hex::decode(hash_hex).map_err(|_| AppError::SecretDecode("hash half is not hex".to_string()))?;
    let salt =
        hex::decode(salt_hex).map_err(|_| AppError::SecretDecode("salt half is not hex".to_string()))?;

    let mut candidate = [0u8; HASH_LEN];
    scrypt::scrypt(plain.as_bytes(), &salt, &cost_params(), &mut candidate)
        .map_err(|e| AppError::Internal(format!("scrypt derivation failed: {e}")))?;

    Ok(constant_time_eq(&stored_hash, &candidate))
}

/// Burn one derivation against a fixed salt.
///
/// Called on login when no account matches the email, so that path costs
/// the same as a real verification.
pub fn dummy_derivation(plain: &str) {
    let mut sink = [0u8; HASH_LEN];
    let _ = scrypt::scrypt(plain.as_bytes(), &[0u8; SALT_LEN], &cost_params(), &mut sink);
}

/// Constant-time byte comparison; run time depends only on the lengths,
/// never on where the first mismatching byte sits.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_then_verify_roundtrip() {
        let secret = derive_secret("secret123").unwrap();
        assert!(verify_secret("secret123", &secret).unwrap());
        assert!(!verify_secret("secret124", &secret).unwrap());
        assert!(!verify_secret("", &secret).unwrap());
    }

    #[test]
    fn derivation_is_salted() {
        let a = derive_secret("secret123").unwrap();
        let b = derive_secret("secret123").unwrap();
        assert_ne!(a, b);
        // yet both verify
        assert!(verify_secret("secret123", &a).unwrap());
        assert!(verify_secret("secret123", &b).unwrap());
    }

    #[test]
    fn secret_format_is_hex_dot_hex() {
        let secret = derive_secret("pw").unwrap();
        let (hash, salt) = secret.split_once('.').unwrap();
        assert_eq!(hash.len(), HASH_LEN * 2);
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn malformed_secret_is_a_decode_error_not_a_mismatch() {
        for secret in [
            "no-separator",
            "aa.bb.cc",
            "zz!!.aabb",
            "aabb.not-hex",
            "",
        ] {
            let err = verify_secret("pw", secret).unwrap_err();
            assert!(
                matches!(err, AppError::SecretDecode(_)),
                "{secret:?} should decode-fail"
            );
        }
    }

    #[test]
    fn scrub_clears_the_plaintext() {
        let mut plain = "secret123".to_string();
        let secret = derive_secret_scrub(&mut plain).unwrap();
        assert!(plain.is_empty());
        assert!(verify_secret("secret123", &secret).unwrap());
    }

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
