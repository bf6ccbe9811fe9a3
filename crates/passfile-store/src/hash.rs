//! Password hashing.
//!
//! The store never sees a plaintext password at rest: the record value is a
//! self-describing hash token produced here. The default scheme is
//! PBKDF2-HMAC-SHA256 via `ring`, with tokens stored as
//! `base64(salt):base64(hash)` so verification needs nothing beyond the
//! token itself.
//!
//! # Security Notes
//!
//! - PBKDF2 iteration count is set to 600,000 as recommended by OWASP
//!   (2023) for HMAC-SHA256.
//! - Salts are generated fresh per `create` from `ring`'s `SystemRandom`,
//!   so hashing the same password twice yields different tokens.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{StoreError, StoreResult};

/// Length of the PBKDF2 salt in bytes.
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes.
pub const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 with 600,000 iterations (OWASP 2023).
const PBKDF2_ITERATIONS: u32 = 600_000;

/// PBKDF2 algorithm.
static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// One-way password hashing with verification.
///
/// The hash token self-describes whatever salt/parameters verification
/// needs: the salt is embedded in the token, never passed to [`verify`].
///
/// [`verify`]: Hasher::verify
pub trait Hasher {
    /// Produce fresh random salt material for one `encode` call.
    fn generate_salt(&self) -> StoreResult<Vec<u8>>;

    /// Hash `password` with the given salt into a storable token.
    fn encode(&self, password: &str, salt: &[u8]) -> StoreResult<String>;

    /// Check `password` against a stored hash token.
    ///
    /// A wrong password is `Ok(false)`. A token that is structurally
    /// broken (missing separator, bad base64) is
    /// [`StoreError::InvalidHashToken`] (corruption, not a mismatch).
    fn verify(&self, hash_token: &str, password: &str) -> StoreResult<bool>;
}

/// PBKDF2-HMAC-SHA256 hasher, the default scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2Hasher;

impl Hasher for Pbkdf2Hasher {
    fn generate_salt(&self) -> StoreResult<Vec<u8>> {
        let rng = SystemRandom::new();
        let mut salt = vec![0u8; SALT_LEN];
        rng.fill(&mut salt).map_err(|_| StoreError::HashingFailed {
            reason: "failed to generate random salt".into(),
        })?;
        Ok(salt)
    }

    fn encode(&self, password: &str, salt: &[u8]) -> StoreResult<String> {
        if salt.is_empty() {
            return Err(StoreError::HashingFailed {
                reason: "salt must not be empty".into(),
            });
        }

        let mut hash = [0u8; KEY_LEN];
        let iterations =
            std::num::NonZeroU32::new(PBKDF2_ITERATIONS).expect("PBKDF2_ITERATIONS is non-zero");
        pbkdf2::derive(PBKDF2_ALG, iterations, salt, password.as_bytes(), &mut hash);

        Ok(format!("{}:{}", BASE64.encode(salt), BASE64.encode(hash)))
    }

    fn verify(&self, hash_token: &str, password: &str) -> StoreResult<bool> {
        let (salt_part, hash_part) =
            hash_token
                .split_once(':')
                .ok_or_else(|| StoreError::InvalidHashToken {
                    reason: "missing ':' between salt and hash".into(),
                })?;

        let salt = BASE64
            .decode(salt_part)
            .map_err(|e| StoreError::InvalidHashToken {
                reason: format!("invalid salt encoding: {e}"),
            })?;
        let expected_hash = BASE64
            .decode(hash_part)
            .map_err(|e| StoreError::InvalidHashToken {
                reason: format!("invalid hash encoding: {e}"),
            })?;

        let iterations =
            std::num::NonZeroU32::new(PBKDF2_ITERATIONS).expect("PBKDF2_ITERATIONS is non-zero");

        Ok(pbkdf2::verify(
            PBKDF2_ALG,
            iterations,
            &salt,
            password.as_bytes(),
            &expected_hash,
        )
        .is_ok())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_verify_round_trips() {
        let hasher = Pbkdf2Hasher;
        let salt = hasher.generate_salt().unwrap();
        let token = hasher.encode("secret1", &salt).unwrap();

        assert!(hasher.verify(&token, "secret1").unwrap());
        assert!(!hasher.verify(&token, "secret2").unwrap());
    }

    #[test]
    fn same_password_different_salt_yields_different_tokens() {
        let hasher = Pbkdf2Hasher;
        let token1 = hasher
            .encode("same-password", &hasher.generate_salt().unwrap())
            .unwrap();
        let token2 = hasher
            .encode("same-password", &hasher.generate_salt().unwrap())
            .unwrap();

        assert_ne!(token1, token2, "tokens should differ due to random salt");
        assert!(hasher.verify(&token1, "same-password").unwrap());
        assert!(hasher.verify(&token2, "same-password").unwrap());
    }

    #[test]
    fn token_embeds_salt_and_hash() {
        let hasher = Pbkdf2Hasher;
        let salt = hasher.generate_salt().unwrap();
        assert_eq!(salt.len(), SALT_LEN);

        let token = hasher.encode("pw", &salt).unwrap();
        let (salt_part, hash_part) = token.split_once(':').unwrap();
        assert_eq!(BASE64.decode(salt_part).unwrap(), salt);
        assert_eq!(BASE64.decode(hash_part).unwrap().len(), KEY_LEN);
    }

    #[test]
    fn verify_rejects_malformed_token() {
        let hasher = Pbkdf2Hasher;

        let err = hasher.verify("no-separator", "pw").unwrap_err();
        assert!(matches!(err, StoreError::InvalidHashToken { .. }));

        let err = hasher.verify("!!!:???", "pw").unwrap_err();
        assert!(matches!(err, StoreError::InvalidHashToken { .. }));
    }

    #[test]
    fn empty_salt_rejected() {
        let err = Pbkdf2Hasher.encode("pw", &[]).unwrap_err();
        assert!(matches!(err, StoreError::HashingFailed { .. }));
    }
}
