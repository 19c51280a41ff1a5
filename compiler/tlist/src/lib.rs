//! Typed lists for compiled code.
//!
//! [`TypedList<T>`] is a homogeneous, resizable sequence whose storage is
//! allocated and freed explicitly, and whose indexing, slicing and mutation
//! reproduce the source language's built-in list exactly.
//!
//! # Layers
//!
//! - **Storage** ([`list`]): one owned buffer, `len <= capacity`, geometric
//!   growth through [`GrowthPolicy`]. Length changes in exactly one place.
//! - **Index resolution** ([`index`]): scalar indices (error when out of
//!   range), insert positions (clamp), and slices (clamp, any step sign).
//! - **Mutation** (`mutate`, `slice`, `ops`): every operation validates and
//!   allocates before it moves an element, so a failed call leaves the list
//!   exactly as it was.
//! - **Dynamic construction** ([`AnyList`]): one list of whichever kind
//!   unifies a run-time sequence of [`Value`]s.
//!
//! # Element lifetime
//!
//! Elements entering a list are acquired once; elements leaving it are
//! released once (see [`Element`]). `pop` hands the list's reference to the
//! caller, so neither hook runs.

#![allow(
    unsafe_code,
    reason = "list storage manages element slots in a raw buffer"
)]

mod dynamic;
pub mod index;
pub mod list;
mod mutate;
mod ops;
mod slice;

#[cfg(test)]
mod test_helpers;

pub use dynamic::AnyList;
pub use index::{ResolvedSlice, SliceSpec};
pub use list::TypedList;

pub use tlist_alloc::{GrowthFactor, GrowthPolicy};
pub use tlist_core::{
    AllocFailure, ElemKind, Element, ListError, ListErrorKind, ListResult, RefHandle, RefHooks,
    Value,
};
