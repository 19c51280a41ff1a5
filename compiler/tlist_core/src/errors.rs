//! Error types for list operations.
//!
//! `ListErrorKind` is the machine-checkable category; the message is the
//! literal text callers (and tests) match on. Factory functions below are
//! the public API for building errors, so every message lives here.

use std::fmt;

use thiserror::Error;
use tlist_alloc::AllocError;

use crate::kind::ElemKind;

/// Result of a fallible list operation.
pub type ListResult<T> = Result<T, ListError>;

/// Sub-reason of an allocation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocFailure {
    /// The requested byte size is not representable.
    SizeOverflow,
    /// The allocator refused a representable request.
    OutOfMemory,
}

/// Typed error category.
///
/// Allocation failures share one family ("cannot allocate") and differ only
/// in their [`AllocFailure`] sub-reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListErrorKind {
    /// Scalar index or `pop` index out of range.
    Index,
    /// Zero slice step, value not found, or extended-slice length mismatch.
    Value,
    /// Element not representable as the list's element kind.
    Type,
    /// Allocation could not be satisfied.
    Alloc(AllocFailure),
}

impl ListErrorKind {
    /// Name of the host-language exception this kind maps to.
    pub fn host_name(self) -> &'static str {
        match self {
            ListErrorKind::Index => "IndexError",
            ListErrorKind::Value => "ValueError",
            ListErrorKind::Type => "TypeError",
            ListErrorKind::Alloc(AllocFailure::SizeOverflow) => "OverflowError",
            ListErrorKind::Alloc(AllocFailure::OutOfMemory) => "MemoryError",
        }
    }

    /// Status code reported across the runtime ABI. `0` means success and
    /// is never returned here.
    pub fn code(self) -> i32 {
        match self {
            ListErrorKind::Index => 1,
            ListErrorKind::Value => 2,
            ListErrorKind::Type => 3,
            ListErrorKind::Alloc(AllocFailure::SizeOverflow) => 4,
            ListErrorKind::Alloc(AllocFailure::OutOfMemory) => 5,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ListErrorKind::Index),
            2 => Some(ListErrorKind::Value),
            3 => Some(ListErrorKind::Type),
            4 => Some(ListErrorKind::Alloc(AllocFailure::SizeOverflow)),
            5 => Some(ListErrorKind::Alloc(AllocFailure::OutOfMemory)),
            _ => None,
        }
    }
}

impl fmt::Display for ListErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

/// A failed list operation.
///
/// `Display` renders only the message, which is what the host runtime puts
/// in its exception.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListError {
    pub kind: ListErrorKind,
    pub message: String,
}

impl ListError {
    pub fn new(kind: ListErrorKind, message: impl Into<String>) -> Self {
        ListError {
            kind,
            message: message.into(),
        }
    }

    /// Whether this is an allocation failure of either sub-reason.
    pub fn is_alloc_failure(&self) -> bool {
        matches!(self.kind, ListErrorKind::Alloc(_))
    }
}

impl From<AllocError> for ListError {
    fn from(err: AllocError) -> Self {
        let failure = match err {
            AllocError::SizeOverflow { .. } => AllocFailure::SizeOverflow,
            AllocError::OutOfMemory { .. } => AllocFailure::OutOfMemory,
        };
        ListError::new(
            ListErrorKind::Alloc(failure),
            format!("cannot allocate list: {err}"),
        )
    }
}

// Factory functions

/// Scalar read outside `[-len, len)`.
#[cold]
pub fn index_out_of_range() -> ListError {
    ListError::new(ListErrorKind::Index, "list index out of range")
}

/// Scalar write or delete outside `[-len, len)`.
#[cold]
pub fn assignment_index_out_of_range() -> ListError {
    ListError::new(ListErrorKind::Index, "list assignment index out of range")
}

#[cold]
pub fn pop_from_empty() -> ListError {
    ListError::new(ListErrorKind::Index, "pop from empty list")
}

#[cold]
pub fn pop_index_out_of_range() -> ListError {
    ListError::new(ListErrorKind::Index, "pop index out of range")
}

#[cold]
pub fn zero_slice_step() -> ListError {
    ListError::new(ListErrorKind::Value, "slice step cannot be zero")
}

/// Extended-slice assignment whose replacement length differs from the
/// number of selected elements.
#[cold]
pub fn cannot_resize_extended_slice(slice_len: usize, replacement_len: usize) -> ListError {
    ListError::new(
        ListErrorKind::Value,
        format!(
            "cannot resize extended list slice with step != 1 \
             (slice has {slice_len} elements, replacement has {replacement_len})"
        ),
    )
}

#[cold]
pub fn remove_not_found() -> ListError {
    ListError::new(ListErrorKind::Value, "list.remove(x): x not in list")
}

#[cold]
pub fn index_not_found() -> ListError {
    ListError::new(ListErrorKind::Value, "list.index(x): x not in list")
}

/// A value of kind `value` cannot be stored in a list of kind `list`.
#[cold]
pub fn not_representable(value: ElemKind, list: ElemKind) -> ListError {
    ListError::new(
        ListErrorKind::Type,
        format!("cannot store a {value} value in a list of {list}"),
    )
}

/// Two element kinds have no common kind to promote to.
#[cold]
pub fn no_common_kind(left: ElemKind, right: ElemKind) -> ListError {
    ListError::new(
        ListErrorKind::Type,
        format!("cannot unify list element kinds {left} and {right}"),
    )
}

#[cold]
pub fn cannot_infer_empty_kind() -> ListError {
    ListError::new(
        ListErrorKind::Type,
        "cannot infer element kind of an empty list",
    )
}

/// An element count (not yet a byte size) overflows `usize`.
#[cold]
pub fn element_count_overflow() -> ListError {
    ListError::new(
        ListErrorKind::Alloc(AllocFailure::SizeOverflow),
        "cannot allocate list: element count overflows",
    )
}
