//! Element access and in-place mutation.
//!
//! Every operation resolves its index and secures capacity before touching
//! a slot. Entering elements are acquired, departing ones released; `pop`
//! hands its element to the caller untouched.

use std::ptr;

use tlist_core::{
    assignment_index_out_of_range, index_out_of_range, pop_from_empty,
    pop_index_out_of_range, remove_not_found, Element, ListResult,
};

use crate::index::{clamp_position, resolve_index};
use crate::list::TypedList;

impl<T: Element> TypedList<T> {
    // ── Scalar access ──

    /// `list[index]`
    pub fn get(&self, index: i64) -> ListResult<&T> {
        let pos = resolve_index(index, self.len()).ok_or_else(index_out_of_range)?;
        Ok(&self.as_slice()[pos])
    }

    /// `list[index] = value`
    pub fn set(&mut self, index: i64, value: T) -> ListResult<()> {
        let pos =
            resolve_index(index, self.len()).ok_or_else(assignment_index_out_of_range)?;
        // Acquire first: `value` may be the very element it replaces.
        value.acquire();
        let old = std::mem::replace(&mut self.as_mut_slice()[pos], value);
        old.release();
        Ok(())
    }

    /// `del list[index]`
    pub fn delete(&mut self, index: i64) -> ListResult<()> {
        let pos =
            resolve_index(index, self.len()).ok_or_else(assignment_index_out_of_range)?;
        self.take_at(pos).release();
        Ok(())
    }

    // ── Growth ──

    /// `list.append(value)`
    pub fn append(&mut self, value: T) -> ListResult<()> {
        self.reserve(1)?;
        value.acquire();
        let len = self.len();
        // SAFETY: capacity > len after `reserve`; the new slot is written
        // before it becomes live.
        unsafe {
            self.as_mut_ptr().add(len).write(value);
            self.set_length(len + 1);
        }
        Ok(())
    }

    /// `list.insert(pos, value)`. Positions past either end clamp to it.
    pub fn insert(&mut self, pos: i64, value: T) -> ListResult<()> {
        let len = self.len();
        let pos = clamp_position(pos, len);
        self.reserve(1)?;
        value.acquire();
        // SAFETY: pos <= len < capacity; the tail shifts one slot right
        // within the allocation, then the gap is filled.
        unsafe {
            let at = self.as_mut_ptr().add(pos);
            ptr::copy(at, at.add(1), len - pos);
            at.write(value);
            self.set_length(len + 1);
        }
        Ok(())
    }

    /// Append every element of `items`, or none of them.
    ///
    /// An `Err` item, or a failed allocation, rolls the list back to its
    /// length on entry, releasing whatever was appended.
    pub fn try_extend<I>(&mut self, items: I) -> ListResult<()>
    where
        I: IntoIterator<Item = ListResult<T>>,
    {
        let base = self.len();
        let result = self.append_all(items);
        if result.is_err() {
            self.shrink_to(base);
        }
        result
    }

    fn append_all<I>(&mut self, items: I) -> ListResult<()>
    where
        I: IntoIterator<Item = ListResult<T>>,
    {
        let items = items.into_iter();
        self.reserve(items.size_hint().0)?;
        for item in items {
            self.append(item?)?;
        }
        Ok(())
    }

    /// `list.extend(items)`
    pub fn extend<I>(&mut self, items: I) -> ListResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_extend(items.into_iter().map(Ok))
    }

    /// `list.extend(items)` from a contiguous source, with one allocation.
    pub fn extend_from_slice(&mut self, items: &[T]) -> ListResult<()> {
        self.reserve(items.len())?;
        let len = self.len();
        for item in items {
            item.acquire();
        }
        // SAFETY: capacity >= len + items.len(); `items` is borrowed
        // shared, so it cannot alias this list's buffer.
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), self.as_mut_ptr().add(len), items.len());
            self.set_length(len + items.len());
        }
        Ok(())
    }

    /// `list.extend(list)`: appends the elements present on entry, once.
    pub fn extend_self(&mut self) -> ListResult<()> {
        let len = self.len();
        self.reserve(len)?;
        for item in self.as_slice() {
            item.acquire();
        }
        // SAFETY: capacity >= 2 * len; source [0, len) and destination
        // [len, 2 * len) do not overlap.
        unsafe {
            let base = self.as_mut_ptr();
            ptr::copy_nonoverlapping(base, base.add(len), len);
            self.set_length(len * 2);
        }
        Ok(())
    }

    // ── Removal ──

    /// `list.pop()` / `list.pop(index)`.
    ///
    /// The list's reference moves to the caller; no hook runs.
    pub fn pop(&mut self, index: Option<i64>) -> ListResult<T> {
        if self.is_empty() {
            return Err(pop_from_empty());
        }
        let pos = resolve_index(index.unwrap_or(-1), self.len())
            .ok_or_else(pop_index_out_of_range)?;
        Ok(self.take_at(pos))
    }

    /// `list.remove(value)`: drops the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> ListResult<()> {
        self.remove_first(|item| item == value)
    }

    /// Release and unlink the first element satisfying `pred`.
    pub(crate) fn remove_first(&mut self, pred: impl FnMut(&T) -> bool) -> ListResult<()> {
        let pos = self.iter().position(pred).ok_or_else(remove_not_found)?;
        self.take_at(pos).release();
        Ok(())
    }

    /// `list.clear()`
    pub fn clear(&mut self) {
        self.shrink_to(0);
    }

    /// `list.reverse()`
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Unlink the element at `pos < len` and close the gap. The element is
    /// returned still acquired.
    fn take_at(&mut self, pos: usize) -> T {
        let len = self.len();
        let slots = self.as_mut_slice();
        let taken = slots[pos];
        slots.copy_within(pos + 1.., pos);
        // SAFETY: len >= 1; the last slot is now a stale duplicate.
        unsafe { self.set_length(len - 1) };
        taken
    }
}
