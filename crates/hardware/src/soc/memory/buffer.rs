//! Guest RAM Buffer Implementation.
//!
//! This module provides a safe wrapper around the raw allocation backing guest RAM.
//! On Unix it maps anonymous memory with `mmap`, so pages are only committed by the OS
//! when touched; elsewhere it falls back to a zeroed `Vec`.

use std::ops::{Deref, DerefMut};
use std::slice;

/// Zero-initialized backing storage for guest RAM.
#[derive(Debug)]
pub struct GuestBuffer {
    ptr: *mut u8,
    size: usize,
    is_mmap: bool,
}

// SAFETY: the buffer exclusively owns its allocation; access goes through `&self`/`&mut self`.
unsafe impl Send for GuestBuffer {}
// SAFETY: shared references only permit reads.
unsafe impl Sync for GuestBuffer {}

impl GuestBuffer {
    /// Allocates a zeroed buffer of `size` bytes.
    ///
    /// Falls back to a heap allocation if `mmap` fails.
    pub fn new(size: usize) -> Self {
        #[cfg(unix)]
        {
            if size > 0 {
                // SAFETY: anonymous private mapping with no address hint; the result is
                // checked against MAP_FAILED before use.
                let ptr = unsafe {
                    libc::mmap(
                        std::ptr::null_mut(),
                        size,
                        libc::PROT_READ | libc::PROT_WRITE,
                        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                        -1,
                        0,
                    )
                };
                if ptr != libc::MAP_FAILED {
                    return Self {
                        ptr: ptr as *mut u8,
                        size,
                        is_mmap: true,
                    };
                }
                tracing::warn!(size, "mmap of guest RAM failed, falling back to the heap");
            }
        }

        let mut vec = vec![0u8; size].into_boxed_slice();
        let ptr = vec.as_mut_ptr();
        std::mem::forget(vec);
        Self {
            ptr,
            size,
            is_mmap: false,
        }
    }

    /// Returns the size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true for a zero-sized buffer.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl Deref for GuestBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` initialized bytes for the lifetime of `self`.
        unsafe { slice::from_raw_parts(self.ptr, self.size) }
    }
}

impl DerefMut for GuestBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.size) }
    }
}

impl Drop for GuestBuffer {
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            // SAFETY: `ptr`/`size` describe a mapping created in `new` and not yet unmapped.
            unsafe {
                let _ = libc::munmap(self.ptr.cast(), self.size);
            }
        } else {
            // SAFETY: `ptr`/`size` came from a leaked `Box<[u8]>` of exactly `size` bytes.
            unsafe {
                drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    self.ptr, self.size,
                )));
            }
        }
    }
}
