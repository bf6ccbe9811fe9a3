//! Username encoding.
//!
//! Usernames are not stored verbatim: the record key is the codec-encoded
//! form of the username, so arbitrary login names (spaces, colons, unicode)
//! cannot break the line format. The transform must be deterministic and
//! reversible, since `list` decodes the keys back into human-readable names.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{StoreError, StoreResult};

/// Reversible, deterministic text transform for identity tokens.
pub trait Codec {
    /// Encode a username into its on-disk identity token.
    fn encode(&self, text: &str) -> String;

    /// Decode an identity token back into the username it was built from.
    ///
    /// Returns [`StoreError::InvalidIdentityToken`] if the token is not in
    /// the codec's alphabet or does not decode to valid UTF-8.
    fn decode(&self, token: &str) -> StoreResult<String>;
}

/// Standard-alphabet Base64 codec, the default identity-token scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Codec for Base64Codec {
    fn encode(&self, text: &str) -> String {
        BASE64.encode(text.as_bytes())
    }

    fn decode(&self, token: &str) -> StoreResult<String> {
        let bytes = BASE64
            .decode(token)
            .map_err(|e| StoreError::InvalidIdentityToken {
                token: token.to_string(),
                reason: e.to_string(),
            })?;

        String::from_utf8(bytes).map_err(|e| StoreError::InvalidIdentityToken {
            token: token.to_string(),
            reason: e.to_string(),
        })
    }
}

// ── tests ────────────────────────────────────────────────────────────
