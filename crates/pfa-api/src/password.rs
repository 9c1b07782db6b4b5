//! # Share-Link Passwords
//!
//! Passwords are never stored. A share link keeps a random 16-byte salt and
//! a stretched digest:
//!
//! ```text
//! h0 = SHA-256(salt || password)
//! hn = SHA-256(h(n-1) || salt || password)   for n in 1..STRETCH_ROUNDS
//! ```
//!
//! Verification recomputes the digest and compares in constant time.
//! Stretching raises the cost of an offline guess by `STRETCH_ROUNDS` but
//! is not memory-hard; share passwords gate convenience links, not
//! accounts.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 applications per digest.
pub const STRETCH_ROUNDS: u32 = 20_000;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Longest accepted password, in characters.
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Salted digest of a share-link password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl PasswordDigest {
    /// Hash a password under a fresh random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(salt, password)
    }

    fn with_salt(salt: [u8; SALT_LEN], password: &str) -> Self {
        Self {
            salt,
            digest: digest(&salt, password),
        }
    }

    /// Rebuild from stored bytes. `None` if either slice has the wrong length.
    pub fn from_parts(salt: &[u8], digest: &[u8]) -> Option<Self> {
        Some(Self {
            salt: salt.try_into().ok()?,
            digest: digest.try_into().ok()?,
        })
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Whether `candidate` hashes to the stored digest.
    pub fn verify(&self, candidate: &str) -> bool {
        let computed = digest(&self.salt, candidate);
        computed[..].ct_eq(&self.digest[..]).into()
    }
}

fn digest(salt: &[u8; SALT_LEN], password: &str) -> [u8; DIGEST_LEN] {
    let mut state: [u8; DIGEST_LEN] = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize()
        .into();
    for _ in 1..STRETCH_ROUNDS {
        state = Sha256::new()
            .chain_update(state)
            .chain_update(salt)
            .chain_update(password.as_bytes())
            .finalize()
            .into();
    }
    state
}

/// Check password length bounds.
pub fn validate_password(password: &str) -> Result<(), String> {
    let chars = password.chars().count();
    if chars < MIN_PASSWORD_CHARS {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        ));
    }
    if chars > MAX_PASSWORD_CHARS {
        return Err(format!(
            "password must not exceed {MAX_PASSWORD_CHARS} characters"
        ));
    }
    Ok(())
}
