//! Memory wiping and protection utilities

use crate::error::{CryptoError, Result};

/// Prevent core dumps from being generated
///
/// # Platform Support
///
/// - **Unix**: Uses `setrlimit(RLIMIT_CORE, 0)`
/// - **Windows**: Currently a no-op (core dumps not typical on Windows)
#[allow(unsafe_code)]
pub fn prevent_core_dumps() -> Result<()> {
    #[cfg(unix)]
    {
        use std::io;
        // SAFETY: setrlimit is safe to call with valid parameters.
        // Setting RLIMIT_CORE to 0 disables core dumps, a non-destructive
        // change to the process's own resource limits.
        unsafe {
            let rlim = libc::rlimit {
                rlim_cur: 0,
                rlim_max: 0,
            };
            if libc::setrlimit(libc::RLIMIT_CORE, &rlim) != 0 {
                return Err(CryptoError::Io(io::Error::last_os_error().to_string()));
            }
        }
    }

    #[cfg(windows)]
    {
        // Windows doesn't typically generate core dumps in the Unix sense
    }

    Ok(())
}

/// Lock memory pages to prevent swapping to disk
///
/// Pins the specified memory region in physical RAM so it cannot be
/// swapped out by the operating system. Use this for key material.
///
/// # Platform Support
///
/// - **Unix**: Uses `mlock(2)` to pin pages
/// - **Other**: No-op
#[allow(unsafe_code)]
pub fn lock_memory(ptr: *const u8, len: usize) -> Result<()> {
    if len == 0 || ptr.is_null() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::io;
        // SAFETY: mlock is safe to call with any valid pointer and length.
        // It merely advises the kernel to keep pages resident in RAM.
        unsafe {
            if libc::mlock(ptr as *const libc::c_void, len) != 0 {
                let err = io::Error::last_os_error();
                // EPERM/ENOMEM are non-fatal: key material still works,
                // it just might be swappable.
                return Err(CryptoError::Io(format!("mlock failed (non-fatal): {err}")));
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (ptr, len);
    }

    Ok(())
}

/// Unlock previously locked memory pages
///
/// Call this once the key material has been zeroized and is no longer
/// needed, so the OS is free to swap the region again.
#[allow(unsafe_code)]
pub fn unlock_memory(ptr: *const u8, len: usize) -> Result<()> {
    if len == 0 || ptr.is_null() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        // SAFETY: munlock is safe to call with any valid pointer and length.
        unsafe {
            libc::munlock(ptr as *const libc::c_void, len);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (ptr, len);
    }

    Ok(())
}

/// Wipe memory on drop using a closure
///
/// Returns a guard that executes the wipe function when dropped.
pub fn wipe_on_drop<F: FnOnce()>(f: F) -> WipeGuard<F> {
    WipeGuard { wipe_fn: Some(f) }
}

/// Guard that executes a wipe function on drop
pub struct WipeGuard<F: FnOnce()> {
    wipe_fn: Option<F>,
}

impl<F: FnOnce()> Drop for WipeGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.wipe_fn.take() {
            f();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_core_dumps() {
        let _ = prevent_core_dumps();
    }

    #[test]
    fn test_lock_memory_null() {
        assert!(lock_memory(std::ptr::null(), 0).is_ok());
    }

    #[test]
    fn test_lock_memory_real() {
        let data = [0u8; 64];
        let _ = lock_memory(data.as_ptr(), data.len());
        let _ = unlock_memory(data.as_ptr(), data.len());
    }

    #[test]
    fn test_wipe_on_drop() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let value = AtomicU32::new(42);
        {
            let _guard = wipe_on_drop(|| {
                value.store(0, Ordering::SeqCst);
            });
            assert_eq!(value.load(Ordering::SeqCst), 42);
        }
        assert_eq!(value.load(Ordering::SeqCst), 0);
    }
}
