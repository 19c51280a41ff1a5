//! Reference elements and their host-supplied lifecycle hooks.

use std::fmt;
use std::ptr;

use crate::errors::{not_representable, ListError};
use crate::kind::{ElemKind, Element, Value};

/// Lifecycle callbacks for one reference type, supplied by the host.
///
/// Compiled code emits one static table per reference-counted element type.
/// `acquire` retains the object (e.g. increments its count) and `release`
/// gives the reference up (decrements, and frees at zero). Both receive the
/// element's opaque pointer and must tolerate null.
#[repr(C)]
#[derive(Debug)]
pub struct RefHooks {
    pub acquire: extern "C" fn(*mut u8),
    pub release: extern "C" fn(*mut u8),
}

/// An opaque reference element: a pointer plus the hooks that manage it.
///
/// Equality is identity: two handles are equal when they point to the same
/// object through the same hook table.
#[derive(Clone, Copy)]
pub struct RefHandle {
    ptr: *mut u8,
    hooks: &'static RefHooks,
}

impl RefHandle {
    pub const fn new(ptr: *mut u8, hooks: &'static RefHooks) -> Self {
        RefHandle { ptr, hooks }
    }

    #[inline]
    pub fn as_ptr(self) -> *mut u8 {
        self.ptr
    }

    #[inline]
    pub fn hooks(self) -> &'static RefHooks {
        self.hooks
    }
}

impl PartialEq for RefHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && ptr::eq(self.hooks, other.hooks)
    }
}

impl Eq for RefHandle {}

impl fmt::Debug for RefHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefHandle").field(&self.ptr).finish()
    }
}

impl Element for RefHandle {
    const KIND: ElemKind = ElemKind::Ref;

    #[inline]
    fn acquire(&self) {
        (self.hooks.acquire)(self.ptr);
    }

    #[inline]
    fn release(&self) {
        (self.hooks.release)(self.ptr);
    }

    fn from_value(value: Value) -> Result<Self, ListError> {
        match value {
            Value::Ref(r) => Ok(r),
            other => Err(not_representable(other.kind(), Self::KIND)),
        }
    }

    fn into_value(self) -> Value {
        Value::Ref(self)
    }
}
