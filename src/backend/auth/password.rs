/**
 * Password Hashing
 *
 * One-way salted hashing with bcrypt. `verify` never fails: a malformed
 * stored hash is simply a mismatch.
 *
 * bcrypt only reads the first 72 bytes of its input. The non-truncating
 * variants are used so a longer password is refused instead of silently
 * matching every password sharing that prefix.
 *
 * # Decoy Hash
 *
 * Login against an unknown username still pays for one bcrypt
 * verification against a decoy hash computed at startup, so the response
 * time does not reveal whether the username exists.
 */

use thiserror::Error;

/// Password hashing failed (treated as an internal fault)
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

const DECOY_PLAINTEXT: &str = "quill-decoy-password";

/// Longest password bcrypt hashes without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

/// bcrypt-backed password service
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
    decoy_hash: String,
}

impl PasswordService {
    /// Create a service hashing at `cost` (bcrypt accepts 4..=31)
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let decoy_hash = bcrypt::non_truncating_hash(DECOY_PLAINTEXT, cost)?;
        Ok(Self { cost, decoy_hash })
    }

    /// Work factor used for new hashes
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `plaintext` with a fresh salt
    ///
    /// Fails for input longer than [`MAX_PASSWORD_BYTES`].
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::non_truncating_hash(plaintext, self.cost)?)
    }

    /// Check `plaintext` against `hash`; any error counts as a mismatch
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::non_truncating_verify(plaintext, hash).unwrap_or(false)
    }

    /// Burn one verification against the decoy hash; always `false`
    pub fn verify_decoy(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.decoy_hash);
        false
    }
}
