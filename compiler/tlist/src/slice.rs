//! Slice read, assignment and deletion.

use std::ptr;

use tlist_core::{cannot_resize_extended_slice, element_count_overflow, Element, ListResult};

use crate::index::SliceSpec;
use crate::list::TypedList;

impl<T: Element> TypedList<T> {
    /// `list[a:b:k]` as a new, independent list with this list's policy.
    pub fn get_slice(&self, spec: SliceSpec) -> ListResult<Self> {
        let range = spec.resolve(self.len())?;
        let mut out = Self::with_capacity_and_policy(range.count, self.policy())?;
        if range.count == 0 {
            return Ok(out);
        }
        let items = self.as_slice();
        if range.is_contiguous() {
            let start = range.position(0);
            out.extend_from_slice(&items[start..start + range.count])?;
        } else {
            out.extend(range.positions().map(|pos| items[pos]))?;
        }
        Ok(out)
    }

    /// `list[a:b:k] = replacement`
    ///
    /// With step 1 the list resizes to fit. Any other step requires the
    /// replacement to match the selection's length exactly; a mismatch is
    /// rejected before any element moves.
    pub fn set_slice(&mut self, spec: SliceSpec, replacement: &[T]) -> ListResult<()> {
        let range = spec.resolve(self.len())?;
        if range.is_contiguous() {
            // An empty forward selection still pins an insertion point.
            let start = usize::try_from(range.start).unwrap_or(0);
            return self.splice(start, range.count, replacement);
        }
        if range.count != replacement.len() {
            return Err(cannot_resize_extended_slice(range.count, replacement.len()));
        }
        let slots = self.as_mut_slice();
        for (pos, &value) in range.positions().zip(replacement) {
            value.acquire();
            let old = std::mem::replace(&mut slots[pos], value);
            old.release();
        }
        Ok(())
    }

    /// `del list[a:b:k]`, for any non-zero step.
    pub fn del_slice(&mut self, spec: SliceSpec) -> ListResult<()> {
        let range = spec.resolve(self.len())?;
        if range.count == 0 {
            return Ok(());
        }
        if range.is_contiguous() {
            return self.splice(range.position(0), range.count, &[]);
        }
        let (first, stride) = range.ascending();
        let len = self.len();
        let slots = self.as_mut_slice();
        // Survivors keep their order in [first, write); the doomed elements
        // collect in [write, len) and leave through `shrink_to`.
        let mut write = first;
        let mut removed = 0;
        for read in first..len {
            if removed < range.count && (read - first) % stride == 0 {
                removed += 1;
            } else {
                slots.swap(write, read);
                write += 1;
            }
        }
        tracing::trace!(removed, stride, "extended slice deleted");
        self.shrink_to(write);
        Ok(())
    }

    /// Replace `removed` elements at `start` with `replacement`.
    ///
    /// Capacity is secured first, so a failure leaves the list untouched.
    fn splice(&mut self, start: usize, removed: usize, replacement: &[T]) -> ListResult<()> {
        let len = self.len();
        let start = start.min(len);
        let removed = removed.min(len - start);
        let new_len = (len - removed)
            .checked_add(replacement.len())
            .ok_or_else(element_count_overflow)?;
        self.ensure_capacity(new_len)?;

        for value in replacement {
            value.acquire();
        }
        // Detach everything from `start` on before releasing: if a release
        // hook unwinds, the detached elements leak instead of being
        // released again on drop.
        // SAFETY: [0, start) stays initialized and acquired.
        unsafe { self.set_length(start) };
        let base = self.as_mut_ptr();
        for offset in start..start + removed {
            // SAFETY: [start, start + removed) was live until the line above.
            unsafe { (*base.add(offset)).release() };
        }
        let tail = len - start - removed;
        // SAFETY: capacity >= max(len, new_len). The tail moves within the
        // allocation (regions may overlap, hence `copy`); `replacement` is a
        // shared borrow and cannot alias the buffer.
        unsafe {
            ptr::copy(
                base.add(start + removed),
                base.add(start + replacement.len()),
                tail,
            );
            ptr::copy_nonoverlapping(replacement.as_ptr(), base.add(start), replacement.len());
            self.set_length(new_len);
        }
        tracing::trace!(start, removed, inserted = replacement.len(), "slice spliced");
        Ok(())
    }
}
