//! Read-only queries and the list operators.

use tlist_core::{element_count_overflow, index_not_found, Element, ListResult};

use crate::index::clamp_position;
use crate::list::TypedList;

impl<T: Element> TypedList<T> {
    /// `list.copy()`: a shallow copy; every element is acquired again.
    pub fn copy(&self) -> ListResult<Self> {
        let mut out = Self::with_capacity_and_policy(self.len(), self.policy())?;
        out.extend_from_slice(self.as_slice())?;
        Ok(out)
    }

    /// `value in list`
    pub fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }

    /// `list.count(value)`
    pub fn count(&self, value: &T) -> usize {
        self.iter().filter(|&item| item == value).count()
    }

    /// `list.index(value, start, stop)`.
    ///
    /// `start` and `stop` clamp like insertion positions, so they never fail
    /// on their own; only a missing value does.
    pub fn index(&self, value: &T, start: Option<i64>, stop: Option<i64>) -> ListResult<usize> {
        self.position_in(start, stop, |item| item == value)
            .ok_or_else(index_not_found)
    }

    /// First position in the clamped window `[start, stop)` whose element
    /// satisfies `pred`.
    pub(crate) fn position_in(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        mut pred: impl FnMut(&T) -> bool,
    ) -> Option<usize> {
        let len = self.len();
        let start = start.map_or(0, |s| clamp_position(s, len));
        let stop = stop.map_or(len, |s| clamp_position(s, len));
        if start >= stop {
            return None;
        }
        self.as_slice()[start..stop]
            .iter()
            .position(|item| pred(item))
            .map(|offset| start + offset)
    }

    /// `self + other` as a new list with this list's policy.
    pub fn concat(&self, other: &Self) -> ListResult<Self> {
        let total = self
            .len()
            .checked_add(other.len())
            .ok_or_else(element_count_overflow)?;
        let mut out = Self::with_capacity_and_policy(total, self.policy())?;
        out.extend_from_slice(self.as_slice())?;
        out.extend_from_slice(other.as_slice())?;
        Ok(out)
    }

    /// `self * times` as a new list with this list's policy.
    ///
    /// `times <= 0` yields an empty list. The full element count is checked
    /// and allocated up front, so an unrepresentable product fails with an
    /// overflow and an unsatisfiable one with out-of-memory, before any
    /// element is copied.
    pub fn repeat(&self, times: i64) -> ListResult<Self> {
        if times <= 0 || self.is_empty() {
            return Ok(Self::with_policy(self.policy()));
        }
        let times = usize::try_from(times).map_err(|_| element_count_overflow())?;
        let total = self
            .len()
            .checked_mul(times)
            .ok_or_else(element_count_overflow)?;
        let mut out = Self::with_capacity_and_policy(total, self.policy())?;
        for _ in 0..times {
            out.extend_from_slice(self.as_slice())?;
        }
        Ok(out)
    }

    /// `bool(list)`
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}
