//! Index resolution.
//!
//! Three rules, all operating on the list's length only (never its
//! capacity):
//!
//! - [`resolve_index`]: `list[i]`. Negative indices count from the end; the
//!   result must land in `[0, len)` or the access fails.
//! - [`clamp_position`]: `insert(pos, v)` and the bounds of `index(v, a, b)`.
//!   Negative positions count from the end, then clamp into `[0, len]`.
//!   Never fails.
//! - [`SliceSpec::resolve`]: `list[a:b:k]`. Any combination of negative,
//!   out-of-range or omitted bounds yields a well-defined, possibly empty,
//!   [`ResolvedSlice`]. Only `k == 0` fails.

use tlist_core::{zero_slice_step, ListResult};

/// List length as a signed index.
///
/// Lengths never exceed `isize::MAX`, so this only saturates on targets where
/// `usize` is wider than 64 bits.
#[inline]
fn signed_len(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Resolve a scalar index against `len`, or `None` if out of range.
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        // index >= i64::MIN and len >= 0: cannot overflow
        index + signed_len(len)
    } else {
        index
    };
    usize::try_from(resolved).ok().filter(|&i| i < len)
}

/// Clamp an insertion position into `[0, len]`.
pub fn clamp_position(pos: i64, len: usize) -> usize {
    let len_i = signed_len(len);
    let clamped = if pos < 0 {
        (pos + len_i).max(0)
    } else {
        pos.min(len_i)
    };
    usize::try_from(clamped).unwrap_or(0)
}

/// A slice as written: `list[start:stop:step]` with any part omitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    /// `list[:]`
    pub const FULL: SliceSpec = SliceSpec {
        start: None,
        stop: None,
        step: None,
    };

    pub const fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        SliceSpec { start, stop, step }
    }

    /// `list[start:stop]`
    pub const fn range(start: i64, stop: i64) -> Self {
        SliceSpec::new(Some(start), Some(stop), None)
    }

    /// `list[start:stop:step]`
    pub const fn stepped(start: i64, stop: i64, step: i64) -> Self {
        SliceSpec::new(Some(start), Some(stop), Some(step))
    }

    /// `list[start:]`
    pub const fn from(start: i64) -> Self {
        SliceSpec::new(Some(start), None, None)
    }

    /// `list[:stop]`
    pub const fn to(stop: i64) -> Self {
        SliceSpec::new(None, Some(stop), None)
    }

    /// Clamp this slice against `len`.
    ///
    /// Bounds are offset by `len` when negative, then clamped into `[0, len]`
    /// for a positive step or `[-1, len - 1]` for a negative one. Omitted
    /// bounds default to the end the step walks away from / towards.
    pub fn resolve(&self, len: usize) -> ListResult<ResolvedSlice> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(zero_slice_step());
        }
        let len = signed_len(len);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };
        let start = self
            .start
            .map_or(if step < 0 { upper } else { lower }, clamp);
        let stop = self.stop.map_or(if step < 0 { lower } else { upper }, clamp);

        let span = if step < 0 { start - stop } else { stop - start };
        let count = if span > 0 {
            element_count(span.unsigned_abs(), step.unsigned_abs())
        } else {
            0
        };
        Ok(ResolvedSlice {
            start,
            stop,
            step,
            count,
        })
    }
}

/// Number of elements a stride of `stride` visits across `span > 0` slots.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the count never exceeds the list length"
)]
fn element_count(span: u64, stride: u64) -> usize {
    ((span - 1) / stride + 1) as usize
}

/// A slice clamped against a concrete length.
///
/// `start` is the first selected position (when `count > 0`); `stop` is the
/// exclusive bound in the direction of `step`, and may be `-1` for a
/// negative step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
    pub count: usize,
}

impl ResolvedSlice {
    /// Position of the `k`-th selected element, `k < count`.
    #[expect(
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "selected positions lie in [0, len) by construction"
    )]
    #[inline]
    pub fn position(&self, k: usize) -> usize {
        debug_assert!(k < self.count);
        (self.start + k as i64 * self.step) as usize
    }

    /// Selected positions in slice order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |k| self.position(k))
    }

    /// Whether the selected elements are adjacent and in ascending order.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.step == 1
    }

    /// The same selection walked in ascending order: `(first, stride)`.
    ///
    /// Meaningful only when `count > 0`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a stride between selected positions is below the list length"
    )]
    pub fn ascending(&self) -> (usize, usize) {
        if self.count == 0 {
            return (0, 1);
        }
        let stride = self.step.unsigned_abs() as usize;
        if self.step > 0 {
            (self.position(0), stride)
        } else {
            (self.position(self.count - 1), stride)
        }
    }
}

#[cfg(test)]
mod tests;
