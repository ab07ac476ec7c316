//! Content fingerprints
//!
//! Every identifier in a run (signal, hypothesis, node, dataset) is derived from
//! content, never from a counter. Identical inputs therefore produce identical
//! identifiers across processes and machines without coordination.
//!
//! Uses SHA-256 via the sha2 crate, truncated to a fixed 16 hex characters.

use sha2::{Digest, Sha256};

/// Length of every rendered fingerprint, in hex characters.
pub const FINGERPRINT_LEN: usize = 16;

/// Separator placed between parts so that ("ab", "c") and ("a", "bc") differ.
const PART_SEPARATOR: u8 = 0x1f;

/// Computes the fingerprint of raw bytes (used for the dataset content hash).
///
/// This function is deterministic: the same input always produces the same output.
pub fn content_hash(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    render(&digest)
}

/// Computes the fingerprint of an ordered list of textual parts.
///
/// ```
/// use datathought::fingerprint::fingerprint;
/// let a = fingerprint(&["variance_spike", "price"]);
/// assert_eq!(a.len(), 16);
/// assert_ne!(a, fingerprint(&["variance_spikep", "rice"]));
/// ```
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update([PART_SEPARATOR]);
        }
        hasher.update(part.as_bytes());
    }
    render(&hasher.finalize())
}

/// Renders a statistic with fixed precision so that identifiers do not depend
/// on the last bits of floating point noise.
pub fn rounded(value: f64) -> String {
    format!("{:.6}", value)
}

fn render(digest: &[u8]) -> String {
    let mut out = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
