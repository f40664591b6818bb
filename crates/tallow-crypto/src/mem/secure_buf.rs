//! Secure buffer that automatically zeroizes on drop

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure buffer that automatically zeroizes its contents when dropped
///
/// Used to hold the derived 32-byte PAKE session key and other sensitive
/// intermediates so they don't linger in memory after a transfer completes.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecureBuf<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> SecureBuf<T> {
    /// Create a new secure buffer
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Expose the secret value as a reference
    ///
    /// The caller must not copy or leak the returned reference's contents.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize> From<T> for SecureBuf<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Zeroize + std::fmt::Debug> std::fmt::Debug for SecureBuf<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureBuf<REDACTED>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_buf_array() {
        let buf = SecureBuf::new([1u8, 2, 3, 4]);
        assert_eq!(buf.expose_secret(), &[1u8, 2, 3, 4]);
    }
}
