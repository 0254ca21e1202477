//! Cache key derivation for translation requests.
//!
//! A fingerprint is the pair (text digest, options digest). Languages are not
//! folded in; the store matches them as separate columns.

use sha2::{Digest, Sha256};

use crate::translation::TranslationOptions;

/// Length in bytes of the options digest (128 bits).
const OPTIONS_DIGEST_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Hex SHA-256 of the exact UTF-8 bytes of the text.
    pub text_digest: String,
    /// Hex 128-bit digest of the canonical options JSON.
    pub options_digest: String,
}

/// Options serialized and hashed once, reused for every text of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOptions {
    json: String,
    digest: String,
}

impl CanonicalOptions {
    pub fn new(options: &TranslationOptions) -> Self {
        let json = options.canonical_json();
        let digest = options_digest(&json);
        Self { json, digest }
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn fingerprint(&self, text: &str) -> Fingerprint {
        Fingerprint {
            text_digest: text_digest(text),
            options_digest: self.digest.clone(),
        }
    }
}

/// Computes the fingerprint of a single request.
pub fn fingerprint(text: &str, options: &TranslationOptions) -> Fingerprint {
    CanonicalOptions::new(options).fingerprint(text)
}

pub fn text_digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// SHA-256 truncated to 128 bits.
pub fn options_digest(canonical_json: &str) -> String {
    let digest = Sha256::digest(canonical_json.as_bytes());
    hex::encode(&digest[..OPTIONS_DIGEST_BYTES])
}
