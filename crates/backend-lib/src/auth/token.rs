// ============================
// axelsub-backend-lib/src/auth/token.rs
// ============================
//! Session token generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Token size in bytes (32 bytes = 256 bits of entropy)
const TOKEN_BYTES: usize = 32;

/// Generate an opaque session token.
///
/// 32 bytes from the thread-local CSPRNG, base64 URL-safe encoded without
/// padding. The token itself carries no meaning; it is only a key into
/// the session store.
pub fn generate_session_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_ne!(token1, token2);

        // 32 bytes of entropy encoded in base64, should be about 43 chars
        assert!(token1.len() >= 42);

        // URL-safe alphabet only, no padding
        assert!(token1
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
