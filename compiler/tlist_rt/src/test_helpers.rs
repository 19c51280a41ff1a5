//! Reference-counted host objects for driving reference lists in tests.
//!
//! Each object is a boxed count starting at `1` (the test's own
//! reference). [`OBJECT_HOOKS`] increments on acquire and decrements on
//! release, freeing the object and bumping a per-thread drop counter when
//! the count reaches zero.

use std::cell::Cell;

use tlist_core::RefHooks;

struct Object {
    count: Cell<i64>,
}

thread_local! {
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// Allocate an object holding one reference.
pub(crate) fn object_new() -> *mut u8 {
    Box::into_raw(Box::new(Object {
        count: Cell::new(1),
    }))
    .cast()
}

/// Current reference count of a live object.
pub(crate) fn object_count(object: *mut u8) -> i64 {
    // SAFETY: tests only pass pointers from `object_new` that are still live.
    unsafe { &*object.cast::<Object>() }.count.get()
}

extern "C" fn object_acquire(object: *mut u8) {
    if object.is_null() {
        return;
    }
    // SAFETY: as for `object_count`.
    let count = &unsafe { &*object.cast::<Object>() }.count;
    count.set(count.get() + 1);
}

/// Give up one reference, freeing the object at zero. Null is ignored.
pub(crate) extern "C" fn object_release(object: *mut u8) {
    if object.is_null() {
        return;
    }
    let ptr = object.cast::<Object>();
    // SAFETY: as for `object_count`.
    let count = &unsafe { &*ptr }.count;
    count.set(count.get() - 1);
    if count.get() == 0 {
        // SAFETY: the last reference is gone; the box came from `object_new`.
        drop(unsafe { Box::from_raw(ptr) });
        DROPPED.with(|d| d.set(d.get() + 1));
    }
}

/// Objects freed on this thread so far.
pub(crate) fn dropped() -> usize {
    DROPPED.with(Cell::get)
}

pub(crate) static OBJECT_HOOKS: RefHooks = RefHooks {
    acquire: object_acquire,
    release: object_release,
};
