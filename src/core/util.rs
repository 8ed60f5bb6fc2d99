//! Common utilities

use sha1::{Digest, Sha1};

/// Hex-encoded SHA-1 digest of bytes
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
