//! Core vocabulary shared by the typed list runtime.
//!
//! - **Element kinds** ([`ElemKind`]): the four representations compiled
//!   code lowers list elements to, and the one-directional promotion rule
//!   (`bool` → `int` → `float`) used when a list's kind is inferred or a
//!   dynamic value is stored.
//!
//! - **Elements** ([`Element`]): the static form: a list's element type
//!   fixes its kind, and the trait carries the acquire/release lifecycle
//!   hooks the list calls when elements enter or leave it.
//!
//! - **Values** ([`Value`]): the dynamic form of one element, used where
//!   the kind of an incoming value is only known at run time.
//!
//! - **Errors** ([`ListError`]): every failure a list operation can report,
//!   with the kind the host runtime maps to its own exception type.
//!
//! # Reference elements
//!
//! [`RefHandle`] pairs an opaque pointer with a host-supplied [`RefHooks`]
//! table. The list never interprets the pointer; it only guarantees that
//! `acquire` and `release` are each called exactly once per entry and exit.

mod errors;
mod kind;
mod refs;

pub use errors::{
    assignment_index_out_of_range, cannot_infer_empty_kind, cannot_resize_extended_slice,
    element_count_overflow, index_not_found, index_out_of_range, no_common_kind,
    not_representable, pop_from_empty, pop_index_out_of_range, remove_not_found,
    zero_slice_step, AllocFailure, ListError, ListErrorKind, ListResult,
};
pub use kind::{unify_kinds, ElemKind, Element, Value};
pub use refs::{RefHandle, RefHooks};
