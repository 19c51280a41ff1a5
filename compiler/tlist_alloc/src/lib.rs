//! Allocation guard and raw storage for typed lists.
//!
//! This crate is the bottom of the typed list stack. It knows nothing about
//! element kinds, lifecycle hooks or list semantics; it only answers two
//! questions:
//!
//! - **How many bytes?** [`request_bytes`] and [`array_layout`] turn an
//!   element count into an allocator request, failing with
//!   [`AllocError::SizeOverflow`] when the product is not representable.
//! - **Where do they live?** [`RawBuf`] owns one contiguous allocation and
//!   grows it, failing with [`AllocError::OutOfMemory`] when the allocator
//!   refuses a representable request. A failed growth leaves the old buffer
//!   untouched.
//!
//! [`GrowthPolicy`] decides how far a buffer grows when it has to.
//!
//! # Crate Dependencies
//!
//! None within the workspace. `tlist_core` converts [`AllocError`] into its
//! user-facing error type.

#![allow(
    unsafe_code,
    reason = "raw buffer management requires direct allocator calls"
)]

mod guard;
mod policy;
mod raw;

pub use guard::{array_layout, max_elements, request_bytes};
pub use policy::{GrowthFactor, GrowthPolicy};
pub use raw::RawBuf;

use thiserror::Error;

/// Why an allocation request could not be satisfied.
///
/// The two variants are deliberately distinct: a size that cannot be
/// expressed is a property of the request, while a refusal is a property of
/// the allocator at that moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// `count * elem_size` does not fit the platform's size type (or exceeds
    /// `isize::MAX`, the largest object the allocator accepts).
    #[error("size of {count} elements of {elem_size} bytes overflows")]
    SizeOverflow { count: usize, elem_size: usize },

    /// The size is representable but the allocator returned null.
    #[error("out of memory requesting {bytes} bytes")]
    OutOfMemory { bytes: usize },
}

#[cfg(test)]
mod tests;
