//! Content fingerprints of AST snapshots.
//!
//! The AST is encoded with bincode (standard config) and the bytes, prefixed
//! by a short domain tag, are hashed with BLAKE3. Two structurally equal
//! trees always produce the same fingerprint; the tree view uses this to tell
//! a reload of the same rule apart from a different rule.

use std::fmt;

use thiserror::Error;

use crate::AstNode;

const DOMAIN_TAG: &[u8; 8] = b"RTREE\x00\x00\x01";

/// Errors that can occur while fingerprinting an AST.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to encode rule tree: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

/// BLAKE3 digest identifying one AST snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

/// Fingerprint an AST.
///
/// Serialization recurses over the tree, so callers holding untrusted input
/// should bound its depth first (the layout converter does).
///
/// # Errors
///
/// Returns [`FingerprintError::Encode`] if bincode fails to encode the tree.
pub fn fingerprint(ast: &AstNode) -> Result<Fingerprint, FingerprintError> {
    let payload = bincode::serde::encode_to_vec(ast, bincode::config::standard())?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN_TAG);
    hasher.update(&payload);
    Ok(Fingerprint(hasher.finalize()))
}
