//! Password-reset token generation
//!
//! Reset tokens are bearer secrets delivered out-of-band, so they come
//! from the operating system's CSPRNG, not a general-purpose PRNG.

use rand::{rngs::OsRng, RngCore};

/// Raw entropy per reset token
const RESET_TOKEN_BYTES: usize = 20;

/// Generate a cryptographically random reset token, hex-encoded
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut out = String::with_capacity(RESET_TOKEN_BYTES * 2);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
