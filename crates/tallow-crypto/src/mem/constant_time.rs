//! Constant-time comparison helpers

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time
///
/// Returns `false` immediately if lengths differ (length is not secret
/// for any value compared in this crate).
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
