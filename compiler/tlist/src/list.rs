//! `TypedList<T>` and its storage manager.
//!
//! The list owns one [`RawBuf`] and a length. Slots `[0, len)` hold live
//! elements, each acquired exactly once; slots `[len, capacity)` are never
//! read. Three primitives touch that split:
//!
//! - [`ensure_capacity`](TypedList::ensure_capacity) grows the buffer
//!   geometrically. On failure nothing changes.
//! - [`shrink_to`](TypedList::shrink_to) drops the length and releases the
//!   departing elements. Never reallocates.
//! - `set_length` is the only place `len` is written.
//!
//! Everything in `mutate`, `slice` and `ops` is built on these.

use std::fmt;
use std::slice;

use tlist_alloc::{max_elements, GrowthPolicy, RawBuf};
use tlist_core::{element_count_overflow, ElemKind, Element, ListResult};

/// A homogeneous, resizable list of `T`.
///
/// The element kind is `T::KIND`, fixed for the list's lifetime. Lists have
/// a single owner; [`copy`](TypedList::copy) is the only way to duplicate
/// one, and it acquires every element again.
pub struct TypedList<T: Element> {
    buf: RawBuf<T>,
    len: usize,
    policy: GrowthPolicy,
}

impl<T: Element> TypedList<T> {
    /// An empty list with the default growth policy. Does not allocate.
    pub const fn new() -> Self {
        Self::with_policy(GrowthPolicy::DEFAULT)
    }

    /// An empty list that grows according to `policy`.
    pub const fn with_policy(policy: GrowthPolicy) -> Self {
        TypedList {
            buf: RawBuf::new(),
            len: 0,
            policy,
        }
    }

    /// An empty list with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> ListResult<Self> {
        Self::with_capacity_and_policy(capacity, GrowthPolicy::DEFAULT)
    }

    pub(crate) fn with_capacity_and_policy(
        capacity: usize,
        policy: GrowthPolicy,
    ) -> ListResult<Self> {
        Ok(TypedList {
            buf: RawBuf::with_capacity(capacity)?,
            len: 0,
            policy,
        })
    }

    /// A list holding `items`, sized exactly to them.
    pub fn from_slice(items: &[T]) -> ListResult<Self> {
        let mut list = Self::with_capacity(items.len())?;
        list.extend_from_slice(items)?;
        Ok(list)
    }

    /// A list built from any finite source, e.g. `list(range(n))`.
    ///
    /// The source's lower size hint sizes the first allocation; a source
    /// that yields more grows the list as usual.
    pub fn try_from_iter<I>(items: I) -> ListResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let items = items.into_iter();
        let mut list = Self::with_capacity(items.size_hint().0)?;
        list.extend(items)?;
        Ok(list)
    }

    // ── Accessors ──

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    #[inline]
    pub fn kind(&self) -> ElemKind {
        T::KIND
    }

    /// The live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized; the pointer is non-null
        // and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements, mutably. Writing through this slice bypasses the
    /// lifecycle hooks, so callers must release what they overwrite.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    // ── Storage manager ──

    /// Make room for at least `required` elements.
    ///
    /// Grows by the list's [`GrowthPolicy`], so a run of single-element
    /// insertions reallocates `O(log n)` times. On failure the buffer, the
    /// length and every element are exactly as before.
    pub fn ensure_capacity(&mut self, required: usize) -> ListResult<()> {
        let cap = self.buf.capacity();
        if required <= cap {
            return Ok(());
        }
        let target = self
            .policy
            .next_capacity(cap, required, max_elements::<T>());
        self.buf.grow_exact(target)?;
        Ok(())
    }

    /// Make room for `additional` more elements beyond the current length.
    pub(crate) fn reserve(&mut self, additional: usize) -> ListResult<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(element_count_overflow)?;
        self.ensure_capacity(required)
    }

    /// Drop the length to `len`, releasing every departing element once.
    ///
    /// A `len` at or above the current length does nothing. The buffer is
    /// never reallocated.
    pub fn shrink_to(&mut self, len: usize) {
        let old = self.len;
        if len >= old {
            return;
        }
        // Detach the tail first: if a release hook unwinds, the remaining
        // tail is leaked rather than released twice.
        // SAFETY: len < old <= capacity and [0, len) stays initialized.
        unsafe { self.set_length(len) };
        // SAFETY: [len, old) were live until the line above.
        let tail = unsafe { slice::from_raw_parts(self.buf.as_ptr().add(len), old - len) };
        for element in tail {
            element.release();
        }
    }

    /// Set the number of live elements.
    ///
    /// # Safety
    ///
    /// `len <= capacity`, and every slot in `[0, len)` holds an initialized,
    /// acquired element. Elements cut off by a shorter length must already
    /// have been released or handed to the caller.
    #[inline]
    pub(crate) unsafe fn set_length(&mut self, len: usize) {
        debug_assert!(len <= self.buf.capacity());
        self.len = len;
    }
}

impl<T: Element> Drop for TypedList<T> {
    fn drop(&mut self) {
        self.shrink_to(0);
    }
}

impl<T: Element> Default for TypedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> PartialEq for TypedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Renders like the source language's `repr`: `[1, 2, 3]`.
impl<T: Element> fmt::Debug for TypedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Element> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
