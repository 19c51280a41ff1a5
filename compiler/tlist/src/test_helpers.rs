//! Shared test utilities for lifecycle checks.
//!
//! Reference elements built with [`handle`] report to thread-local counters
//! through [`COUNTING_HOOKS`]. Each test runs on its own thread, so counts
//! never leak between tests. Only compiled in test builds.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tlist_core::{RefHandle, RefHooks};

thread_local! {
    static HELD: RefCell<HashMap<usize, i64>> = RefCell::new(HashMap::new());
    static ACQUIRED: Cell<usize> = const { Cell::new(0) };
    static RELEASED: Cell<usize> = const { Cell::new(0) };
}

extern "C" fn count_acquire(ptr: *mut u8) {
    HELD.with(|held| *held.borrow_mut().entry(ptr as usize).or_insert(0) += 1);
    ACQUIRED.with(|n| n.set(n.get() + 1));
}

extern "C" fn count_release(ptr: *mut u8) {
    HELD.with(|held| *held.borrow_mut().entry(ptr as usize).or_insert(0) -= 1);
    RELEASED.with(|n| n.set(n.get() + 1));
}

pub(crate) static COUNTING_HOOKS: RefHooks = RefHooks {
    acquire: count_acquire,
    release: count_release,
};

/// A reference element identified by `id`, tracked by the counters.
pub(crate) fn handle(id: usize) -> RefHandle {
    RefHandle::new(id as *mut u8, &COUNTING_HOOKS)
}

/// Net references lists currently hold to object `id`.
pub(crate) fn held(id: usize) -> i64 {
    HELD.with(|held| held.borrow().get(&id).copied().unwrap_or(0))
}

/// Total acquire calls on this thread.
pub(crate) fn acquired() -> usize {
    ACQUIRED.with(Cell::get)
}

/// Total release calls on this thread.
pub(crate) fn released() -> usize {
    RELEASED.with(Cell::get)
}

/// Whether every acquire on this thread has been matched by a release.
pub(crate) fn balanced() -> bool {
    HELD.with(|held| held.borrow().values().all(|&n| n == 0))
}

/// A list of `ids.len()` tracked handles.
pub(crate) fn ref_list(ids: &[usize]) -> crate::TypedList<RefHandle> {
    let handles: Vec<RefHandle> = ids.iter().map(|&id| handle(id)).collect();
    crate::TypedList::from_slice(&handles).unwrap_or_default()
}
