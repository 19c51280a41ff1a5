//! Overflow-checked size computation.
//!
//! Every allocator call in the workspace goes through [`array_layout`], so a
//! request that cannot be represented is rejected before the allocator ever
//! sees it.

use std::alloc::Layout;
use std::mem;

use crate::AllocError;

/// Largest object size the global allocator accepts (`isize::MAX`).
const MAX_OBJECT_BYTES: usize = usize::MAX >> 1;

/// Largest number of `T` a single buffer can hold.
pub const fn max_elements<T>() -> usize {
    let size = mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        MAX_OBJECT_BYTES / size
    }
}

/// Compute `count * elem_size` as an allocator request.
///
/// Fails with [`AllocError::SizeOverflow`] when the product overflows `usize`
/// or exceeds `isize::MAX`.
pub fn request_bytes(count: usize, elem_size: usize) -> Result<usize, AllocError> {
    match count.checked_mul(elem_size) {
        Some(bytes) if bytes <= MAX_OBJECT_BYTES => Ok(bytes),
        _ => {
            tracing::debug!(count, elem_size, "allocation size not representable");
            Err(AllocError::SizeOverflow { count, elem_size })
        }
    }
}

/// Layout for a buffer of `count` elements of `T`.
pub fn array_layout<T>(count: usize) -> Result<Layout, AllocError> {
    let elem_size = mem::size_of::<T>();
    let bytes = request_bytes(count, elem_size)?;
    // Rounding the size up to the alignment can still cross isize::MAX.
    Layout::from_size_align(bytes, mem::align_of::<T>())
        .map_err(|_| AllocError::SizeOverflow { count, elem_size })
}
