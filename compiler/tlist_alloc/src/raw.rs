//! Owned, growable, uninitialized element storage.

use std::alloc;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::guard::array_layout;
use crate::AllocError;

/// One contiguous allocation of `capacity` slots of `T`.
///
/// `RawBuf` never reads, writes or drops elements: which slots are live is
/// the owner's business. Dropping the buffer only returns the memory.
///
/// A capacity of zero holds no allocation (the pointer is dangling).
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: RawBuf uniquely owns its allocation, like Box<[T]>.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: shared access only hands out `*const T`.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// An empty buffer. Does not allocate.
    pub const fn new() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: if mem::size_of::<T>() == 0 { usize::MAX } else { 0 },
            _owns: PhantomData,
        }
    }

    /// A buffer with room for exactly `cap` elements.
    pub fn with_capacity(cap: usize) -> Result<Self, AllocError> {
        let mut buf = Self::new();
        buf.grow_exact(cap)?;
        Ok(buf)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Grow to exactly `new_cap` slots, preserving the bytes of every
    /// existing slot.
    ///
    /// A `new_cap` at or below the current capacity is a no-op. On failure
    /// the buffer keeps its old allocation and capacity.
    pub fn grow_exact(&mut self, new_cap: usize) -> Result<(), AllocError> {
        if new_cap <= self.cap {
            return Ok(());
        }
        let new_layout = array_layout::<T>(new_cap)?;

        let raw = if self.cap == 0 {
            // SAFETY: new_cap > 0 and T is not zero-sized (cap would be
            // usize::MAX), so the layout has a non-zero size.
            unsafe { alloc::alloc(new_layout) }
        } else {
            let old_layout = array_layout::<T>(self.cap)?;
            // SAFETY: ptr was allocated by us with old_layout, and the new
            // size was validated by array_layout.
            unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };

        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            tracing::debug!(
                bytes = new_layout.size(),
                old_cap = self.cap,
                new_cap,
                "allocator refused list buffer"
            );
            return Err(AllocError::OutOfMemory {
                bytes: new_layout.size(),
            });
        };

        tracing::trace!(
            old_cap = self.cap,
            new_cap,
            bytes = new_layout.size(),
            "list buffer grown"
        );
        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }
}

impl<T> Default for RawBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        if let Ok(layout) = array_layout::<T>(self.cap) {
            // SAFETY: ptr was allocated by us with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

impl<T> std::fmt::Debug for RawBuf<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawBuf")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}
