//! List entry points.
//!
//! Each scalar kind gets its own family of functions (`tl_list_i64_*`,
//! `tl_list_f64_*`, `tl_list_bool_*`) over an opaque `TypedList<T>` handle.
//! The families are generated from one set of generic bodies below, so the
//! three kinds cannot drift apart.
//!
//! Reference lists (`tl_list_ref_*`) carry the host's [`RefHooks`] table
//! alongside the list and wrap raw object pointers into [`RefHandle`]s on
//! the way in.
//!
//! Conventions shared by every family:
//!
//! - Handles are created by `*_new`, `*_copy` and the slice/operator
//!   constructors, and destroyed by `*_free`. A failed constructor returns
//!   null.
//! - Values are read out through `out` pointers, written only on success.
//!   A null `out` discards the value.
//! - `get` hands out the element without acquiring it; `pop` hands out the
//!   list's own reference.

use std::ptr;

use tlist::{SliceSpec, TypedList};
use tlist_core::{Element, ListResult, RefHandle, RefHooks};

use crate::error::{null_handle, record, status};

/// A slice crossing the ABI: `list[start:stop:step]`.
///
/// Omitted bounds are flagged by `has_start` / `has_stop`; an omitted step
/// is passed as `1`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TlSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
    pub has_start: bool,
    pub has_stop: bool,
}

impl TlSlice {
    fn spec(self) -> SliceSpec {
        SliceSpec::new(
            self.has_start.then_some(self.start),
            self.has_stop.then_some(self.stop),
            Some(self.step),
        )
    }
}

// ── Generic bodies ──────────────────────────────────────────────────────

fn into_handle<T: Element>(list: TypedList<T>) -> *mut TypedList<T> {
    Box::into_raw(Box::new(list))
}

/// Handle for a successful construction, or null with the error recorded.
fn handle_or_null<T: Element>(result: ListResult<TypedList<T>>) -> *mut TypedList<T> {
    match result {
        Ok(list) => into_handle(list),
        Err(err) => {
            record(err);
            ptr::null_mut()
        }
    }
}

/// Borrow a handle, or fail with a null-handle error.
fn borrow<'a, T: Element>(list: *const TypedList<T>) -> ListResult<&'a TypedList<T>> {
    // SAFETY: non-null handles come from `into_handle` and are live until
    // `free`.
    unsafe { list.as_ref() }.ok_or_else(null_handle)
}

fn borrow_mut<'a, T: Element>(list: *mut TypedList<T>) -> ListResult<&'a mut TypedList<T>> {
    // SAFETY: as for `borrow`; generated code never shares a handle across
    // a mutating call.
    unsafe { list.as_mut() }.ok_or_else(null_handle)
}

/// Write `value` through `out` unless `out` is null.
fn write_out<V>(out: *mut V, value: V) {
    if !out.is_null() {
        // SAFETY: non-null out pointers are valid for writes.
        unsafe { out.write(value) };
    }
}

/// View `len` elements at `data` as a slice; null or non-positive is empty.
fn array<'a, T>(data: *const T, len: i64) -> &'a [T] {
    if data.is_null() || len <= 0 {
        return &[];
    }
    // SAFETY: generated code passes a live array of `len` elements.
    unsafe { std::slice::from_raw_parts(data, len as usize) }
}

fn list_with_capacity<T: Element>(capacity: i64) -> *mut TypedList<T> {
    handle_or_null(TypedList::with_capacity(capacity.max(0) as usize))
}

fn list_from_array<T: Element>(data: *const T, len: i64) -> *mut TypedList<T> {
    handle_or_null(TypedList::from_slice(array(data, len)))
}

fn list_free<T: Element>(list: *mut TypedList<T>) {
    if !list.is_null() {
        // SAFETY: the handle came from `into_handle` and is freed once.
        drop(unsafe { Box::from_raw(list) });
    }
}

fn list_len<T: Element>(list: *const TypedList<T>) -> i64 {
    borrow(list).map_or(0, |list| list.len() as i64)
}

fn list_truthy<T: Element>(list: *const TypedList<T>) -> bool {
    borrow(list).is_ok_and(TypedList::is_truthy)
}

fn list_get<T: Element>(list: *const TypedList<T>, index: i64, out: *mut T) -> i32 {
    status(borrow(list).and_then(|list| {
        write_out(out, *list.get(index)?);
        Ok(())
    }))
}

fn list_set<T: Element>(list: *mut TypedList<T>, index: i64, value: T) -> i32 {
    status(borrow_mut(list).and_then(|list| list.set(index, value)))
}

fn list_delete<T: Element>(list: *mut TypedList<T>, index: i64) -> i32 {
    status(borrow_mut(list).and_then(|list| list.delete(index)))
}

fn list_append<T: Element>(list: *mut TypedList<T>, value: T) -> i32 {
    status(borrow_mut(list).and_then(|list| list.append(value)))
}

/// `list.extend(array)`; `array` may point into `list`'s own elements.
fn list_extend_array<T: Element>(list: *mut TypedList<T>, data: *const T, len: i64) -> i32 {
    status(borrow_mut(list).and_then(|list| {
        let items = array(data, len);
        let live = list.as_slice().as_ptr_range();
        let items_range = items.as_ptr_range();
        if items_range.start < live.end && live.start < items_range.end {
            // Growing would free the source: copy it out first.
            let snapshot = items.to_vec();
            return list.extend_from_slice(&snapshot);
        }
        list.extend_from_slice(items)
    }))
}

/// `list.extend(other)`; `other` may be `list` itself.
fn list_extend_list<T: Element>(list: *mut TypedList<T>, other: *const TypedList<T>) -> i32 {
    if ptr::eq(list, other) {
        return status(borrow_mut(list).and_then(TypedList::extend_self));
    }
    status(borrow(other).and_then(|other| {
        borrow_mut(list).and_then(|list| list.extend_from_slice(other.as_slice()))
    }))
}

fn list_insert<T: Element>(list: *mut TypedList<T>, pos: i64, value: T) -> i32 {
    status(borrow_mut(list).and_then(|list| list.insert(pos, value)))
}

fn list_pop<T: Element>(list: *mut TypedList<T>, index: i64, has_index: bool, out: *mut T) -> i32 {
    status(borrow_mut(list).and_then(|list| {
        let value = list.pop(has_index.then_some(index))?;
        write_out(out, value);
        Ok(())
    }))
}

fn list_remove<T: Element>(list: *mut TypedList<T>, value: T) -> i32 {
    status(borrow_mut(list).and_then(|list| list.remove(&value)))
}

fn list_index<T: Element>(
    list: *const TypedList<T>,
    value: T,
    bounds: TlSlice,
    out: *mut i64,
) -> i32 {
    let spec = bounds.spec();
    status(borrow(list).and_then(|list| {
        let pos = list.index(&value, spec.start, spec.stop)?;
        write_out(out, pos as i64);
        Ok(())
    }))
}

fn list_count<T: Element>(list: *const TypedList<T>, value: T) -> i64 {
    borrow(list).map_or(0, |list| list.count(&value) as i64)
}

fn list_contains<T: Element>(list: *const TypedList<T>, value: T) -> bool {
    borrow(list).is_ok_and(|list| list.contains(&value))
}

fn list_reverse<T: Element>(list: *mut TypedList<T>) {
    if let Ok(list) = borrow_mut(list) {
        list.reverse();
    }
}

fn list_clear<T: Element>(list: *mut TypedList<T>) {
    if let Ok(list) = borrow_mut(list) {
        list.clear();
    }
}

fn list_copy<T: Element>(list: *const TypedList<T>) -> *mut TypedList<T> {
    handle_or_null(borrow(list).and_then(TypedList::copy))
}

fn list_get_slice<T: Element>(list: *const TypedList<T>, slice: TlSlice) -> *mut TypedList<T> {
    handle_or_null(borrow(list).and_then(|list| list.get_slice(slice.spec())))
}

/// `list[a:b:k] = source`; `source` may be `list` itself.
fn list_set_slice<T: Element>(
    list: *mut TypedList<T>,
    slice: TlSlice,
    source: *const TypedList<T>,
) -> i32 {
    let spec = slice.spec();
    if ptr::eq(list, source) {
        return status(borrow_mut(list).and_then(|list| {
            let snapshot = list.copy()?;
            list.set_slice(spec, snapshot.as_slice())
        }));
    }
    status(borrow(source).and_then(|source| {
        borrow_mut(list).and_then(|list| list.set_slice(spec, source.as_slice()))
    }))
}

fn list_del_slice<T: Element>(list: *mut TypedList<T>, slice: TlSlice) -> i32 {
    status(borrow_mut(list).and_then(|list| list.del_slice(slice.spec())))
}

fn list_concat<T: Element>(
    left: *const TypedList<T>,
    right: *const TypedList<T>,
) -> *mut TypedList<T> {
    handle_or_null(borrow(left).and_then(|left| borrow(right).and_then(|right| left.concat(right))))
}

fn list_repeat<T: Element>(list: *const TypedList<T>, times: i64) -> *mut TypedList<T> {
    handle_or_null(borrow(list).and_then(|list| list.repeat(times)))
}

// ── Scalar families ─────────────────────────────────────────────────────

/// Emit one `#[no_mangle]` family for a scalar element type.
macro_rules! scalar_list_abi {
    (
        $elem:ty {
            new: $new:ident,
            with_capacity: $with_capacity:ident,
            from_array: $from_array:ident,
            free: $free:ident,
            len: $len:ident,
            truthy: $truthy:ident,
            get: $get:ident,
            set: $set:ident,
            delete: $delete:ident,
            append: $append:ident,
            extend_array: $extend_array:ident,
            extend_list: $extend_list:ident,
            insert: $insert:ident,
            pop: $pop:ident,
            remove: $remove:ident,
            index: $index:ident,
            count: $count:ident,
            contains: $contains:ident,
            reverse: $reverse:ident,
            clear: $clear:ident,
            copy: $copy:ident,
            get_slice: $get_slice:ident,
            set_slice: $set_slice:ident,
            del_slice: $del_slice:ident,
            concat: $concat:ident,
            repeat: $repeat:ident $(,)?
        }
    ) => {
        /// Create an empty list. Does not allocate.
        #[no_mangle]
        pub extern "C" fn $new() -> *mut TypedList<$elem> {
            into_handle(TypedList::new())
        }

        /// Create an empty list with room for exactly `capacity` elements.
        #[no_mangle]
        pub extern "C" fn $with_capacity(capacity: i64) -> *mut TypedList<$elem> {
            list_with_capacity(capacity)
        }

        /// Create a list holding a copy of `len` elements at `data`.
        #[no_mangle]
        pub extern "C" fn $from_array(data: *const $elem, len: i64) -> *mut TypedList<$elem> {
            list_from_array(data, len)
        }

        /// Destroy a list. Null is ignored.
        #[no_mangle]
        pub extern "C" fn $free(list: *mut TypedList<$elem>) {
            list_free(list);
        }

        /// Number of elements; `0` for null.
        #[no_mangle]
        pub extern "C" fn $len(list: *const TypedList<$elem>) -> i64 {
            list_len(list)
        }

        /// `bool(list)`; `false` for null.
        #[no_mangle]
        pub extern "C" fn $truthy(list: *const TypedList<$elem>) -> bool {
            list_truthy(list)
        }

        /// `*out = list[index]`
        #[no_mangle]
        pub extern "C" fn $get(list: *const TypedList<$elem>, index: i64, out: *mut $elem) -> i32 {
            list_get(list, index, out)
        }

        /// `list[index] = value`
        #[no_mangle]
        pub extern "C" fn $set(list: *mut TypedList<$elem>, index: i64, value: $elem) -> i32 {
            list_set(list, index, value)
        }

        /// `del list[index]`
        #[no_mangle]
        pub extern "C" fn $delete(list: *mut TypedList<$elem>, index: i64) -> i32 {
            list_delete(list, index)
        }

        /// `list.append(value)`
        #[no_mangle]
        pub extern "C" fn $append(list: *mut TypedList<$elem>, value: $elem) -> i32 {
            list_append(list, value)
        }

        /// `list.extend(array)`. `data` may point into `list` itself; any
        /// other source must not overlap the list's buffer.
        #[no_mangle]
        pub extern "C" fn $extend_array(
            list: *mut TypedList<$elem>,
            data: *const $elem,
            len: i64,
        ) -> i32 {
            list_extend_array(list, data, len)
        }

        /// `list.extend(other)`; `other` may be `list`.
        #[no_mangle]
        pub extern "C" fn $extend_list(
            list: *mut TypedList<$elem>,
            other: *const TypedList<$elem>,
        ) -> i32 {
            list_extend_list(list, other)
        }

        /// `list.insert(pos, value)`
        #[no_mangle]
        pub extern "C" fn $insert(list: *mut TypedList<$elem>, pos: i64, value: $elem) -> i32 {
            list_insert(list, pos, value)
        }

        /// `*out = list.pop(index)`, or `list.pop()` when `has_index` is false.
        #[no_mangle]
        pub extern "C" fn $pop(
            list: *mut TypedList<$elem>,
            index: i64,
            has_index: bool,
            out: *mut $elem,
        ) -> i32 {
            list_pop(list, index, has_index, out)
        }

        /// `list.remove(value)`
        #[no_mangle]
        pub extern "C" fn $remove(list: *mut TypedList<$elem>, value: $elem) -> i32 {
            list_remove(list, value)
        }

        /// `*out = list.index(value, start, stop)`; the step of `bounds` is
        /// ignored.
        #[no_mangle]
        pub extern "C" fn $index(
            list: *const TypedList<$elem>,
            value: $elem,
            bounds: TlSlice,
            out: *mut i64,
        ) -> i32 {
            list_index(list, value, bounds, out)
        }

        /// `list.count(value)`; `0` for null.
        #[no_mangle]
        pub extern "C" fn $count(list: *const TypedList<$elem>, value: $elem) -> i64 {
            list_count(list, value)
        }

        /// `value in list`; `false` for null.
        #[no_mangle]
        pub extern "C" fn $contains(list: *const TypedList<$elem>, value: $elem) -> bool {
            list_contains(list, value)
        }

        /// `list.reverse()`
        #[no_mangle]
        pub extern "C" fn $reverse(list: *mut TypedList<$elem>) {
            list_reverse(list);
        }

        /// `list.clear()`
        #[no_mangle]
        pub extern "C" fn $clear(list: *mut TypedList<$elem>) {
            list_clear(list);
        }

        /// `list.copy()`
        #[no_mangle]
        pub extern "C" fn $copy(list: *const TypedList<$elem>) -> *mut TypedList<$elem> {
            list_copy(list)
        }

        /// `list[a:b:k]` as a new list.
        #[no_mangle]
        pub extern "C" fn $get_slice(
            list: *const TypedList<$elem>,
            slice: TlSlice,
        ) -> *mut TypedList<$elem> {
            list_get_slice(list, slice)
        }

        /// `list[a:b:k] = source`; `source` may be `list`.
        #[no_mangle]
        pub extern "C" fn $set_slice(
            list: *mut TypedList<$elem>,
            slice: TlSlice,
            source: *const TypedList<$elem>,
        ) -> i32 {
            list_set_slice(list, slice, source)
        }

        /// `del list[a:b:k]`
        #[no_mangle]
        pub extern "C" fn $del_slice(list: *mut TypedList<$elem>, slice: TlSlice) -> i32 {
            list_del_slice(list, slice)
        }

        /// `left + right` as a new list.
        #[no_mangle]
        pub extern "C" fn $concat(
            left: *const TypedList<$elem>,
            right: *const TypedList<$elem>,
        ) -> *mut TypedList<$elem> {
            list_concat(left, right)
        }

        /// `list * times` as a new list.
        #[no_mangle]
        pub extern "C" fn $repeat(list: *const TypedList<$elem>, times: i64) -> *mut TypedList<$elem> {
            list_repeat(list, times)
        }
    };
}

scalar_list_abi!(i64 {
    new: tl_list_i64_new,
    with_capacity: tl_list_i64_with_capacity,
    from_array: tl_list_i64_from_array,
    free: tl_list_i64_free,
    len: tl_list_i64_len,
    truthy: tl_list_i64_truthy,
    get: tl_list_i64_get,
    set: tl_list_i64_set,
    delete: tl_list_i64_delete,
    append: tl_list_i64_append,
    extend_array: tl_list_i64_extend_array,
    extend_list: tl_list_i64_extend_list,
    insert: tl_list_i64_insert,
    pop: tl_list_i64_pop,
    remove: tl_list_i64_remove,
    index: tl_list_i64_index,
    count: tl_list_i64_count,
    contains: tl_list_i64_contains,
    reverse: tl_list_i64_reverse,
    clear: tl_list_i64_clear,
    copy: tl_list_i64_copy,
    get_slice: tl_list_i64_get_slice,
    set_slice: tl_list_i64_set_slice,
    del_slice: tl_list_i64_del_slice,
    concat: tl_list_i64_concat,
    repeat: tl_list_i64_repeat,
});

scalar_list_abi!(f64 {
    new: tl_list_f64_new,
    with_capacity: tl_list_f64_with_capacity,
    from_array: tl_list_f64_from_array,
    free: tl_list_f64_free,
    len: tl_list_f64_len,
    truthy: tl_list_f64_truthy,
    get: tl_list_f64_get,
    set: tl_list_f64_set,
    delete: tl_list_f64_delete,
    append: tl_list_f64_append,
    extend_array: tl_list_f64_extend_array,
    extend_list: tl_list_f64_extend_list,
    insert: tl_list_f64_insert,
    pop: tl_list_f64_pop,
    remove: tl_list_f64_remove,
    index: tl_list_f64_index,
    count: tl_list_f64_count,
    contains: tl_list_f64_contains,
    reverse: tl_list_f64_reverse,
    clear: tl_list_f64_clear,
    copy: tl_list_f64_copy,
    get_slice: tl_list_f64_get_slice,
    set_slice: tl_list_f64_set_slice,
    del_slice: tl_list_f64_del_slice,
    concat: tl_list_f64_concat,
    repeat: tl_list_f64_repeat,
});

scalar_list_abi!(bool {
    new: tl_list_bool_new,
    with_capacity: tl_list_bool_with_capacity,
    from_array: tl_list_bool_from_array,
    free: tl_list_bool_free,
    len: tl_list_bool_len,
    truthy: tl_list_bool_truthy,
    get: tl_list_bool_get,
    set: tl_list_bool_set,
    delete: tl_list_bool_delete,
    append: tl_list_bool_append,
    extend_array: tl_list_bool_extend_array,
    extend_list: tl_list_bool_extend_list,
    insert: tl_list_bool_insert,
    pop: tl_list_bool_pop,
    remove: tl_list_bool_remove,
    index: tl_list_bool_index,
    count: tl_list_bool_count,
    contains: tl_list_bool_contains,
    reverse: tl_list_bool_reverse,
    clear: tl_list_bool_clear,
    copy: tl_list_bool_copy,
    get_slice: tl_list_bool_get_slice,
    set_slice: tl_list_bool_set_slice,
    del_slice: tl_list_bool_del_slice,
    concat: tl_list_bool_concat,
    repeat: tl_list_bool_repeat,
});

// ── Reference lists ─────────────────────────────────────────────────────

/// A list of host objects, bound to the hook table that manages them.
pub struct TlRefList {
    list: TypedList<RefHandle>,
    hooks: &'static RefHooks,
}

impl TlRefList {
    fn wrap(&self, object: *mut u8) -> RefHandle {
        RefHandle::new(object, self.hooks)
    }
}

fn ref_list<'a>(list: *const TlRefList) -> ListResult<&'a TlRefList> {
    // SAFETY: non-null handles come from `tl_list_ref_new` / `_copy`.
    unsafe { list.as_ref() }.ok_or_else(null_handle)
}

fn ref_list_mut<'a>(list: *mut TlRefList) -> ListResult<&'a mut TlRefList> {
    // SAFETY: as for `ref_list`.
    unsafe { list.as_mut() }.ok_or_else(null_handle)
}

/// Create an empty reference list managed by `hooks`.
///
/// `hooks` must point to a table that lives for the rest of the program
/// (compiled code emits one static table per element type). Null fails.
#[no_mangle]
pub extern "C" fn tl_list_ref_new(hooks: *const RefHooks) -> *mut TlRefList {
    // SAFETY: generated code passes a pointer to a static hook table.
    let Some(hooks) = (unsafe { hooks.as_ref() }) else {
        record(null_handle());
        return ptr::null_mut();
    };
    Box::into_raw(Box::new(TlRefList {
        list: TypedList::new(),
        hooks,
    }))
}

/// Destroy a reference list, releasing every element. Null is ignored.
#[no_mangle]
pub extern "C" fn tl_list_ref_free(list: *mut TlRefList) {
    if !list.is_null() {
        // SAFETY: the handle came from `tl_list_ref_new` / `_copy` and is
        // freed once.
        drop(unsafe { Box::from_raw(list) });
    }
}

/// Number of elements; `0` for null.
#[no_mangle]
pub extern "C" fn tl_list_ref_len(list: *const TlRefList) -> i64 {
    ref_list(list).map_or(0, |list| list.list.len() as i64)
}

/// `list.append(object)`: the list acquires its own reference.
#[no_mangle]
pub extern "C" fn tl_list_ref_append(list: *mut TlRefList, object: *mut u8) -> i32 {
    status(ref_list_mut(list).and_then(|list| {
        let handle = list.wrap(object);
        list.list.append(handle)
    }))
}

/// `*out = list[index]`, borrowed: the caller acquires it to keep it.
#[no_mangle]
pub extern "C" fn tl_list_ref_get(list: *const TlRefList, index: i64, out: *mut *mut u8) -> i32 {
    status(ref_list(list).and_then(|list| {
        write_out(out, list.list.get(index)?.as_ptr());
        Ok(())
    }))
}

/// `list[index] = object`: acquires `object`, releases the old element.
#[no_mangle]
pub extern "C" fn tl_list_ref_set(list: *mut TlRefList, index: i64, object: *mut u8) -> i32 {
    status(ref_list_mut(list).and_then(|list| {
        let handle = list.wrap(object);
        list.list.set(index, handle)
    }))
}

/// `*out = list.pop(index)`: the list's reference moves to the caller.
#[no_mangle]
pub extern "C" fn tl_list_ref_pop(
    list: *mut TlRefList,
    index: i64,
    has_index: bool,
    out: *mut *mut u8,
) -> i32 {
    status(ref_list_mut(list).and_then(|list| {
        let handle = list.list.pop(has_index.then_some(index))?;
        write_out(out, handle.as_ptr());
        Ok(())
    }))
}

/// `list.clear()`: releases every element.
#[no_mangle]
pub extern "C" fn tl_list_ref_clear(list: *mut TlRefList) {
    if let Ok(list) = ref_list_mut(list) {
        list.list.clear();
    }
}

/// `list.copy()`: every element is acquired again.
#[no_mangle]
pub extern "C" fn tl_list_ref_copy(list: *const TlRefList) -> *mut TlRefList {
    let copied = ref_list(list).and_then(|list| {
        Ok(TlRefList {
            list: list.list.copy()?,
            hooks: list.hooks,
        })
    });
    match copied {
        Ok(copy) => Box::into_raw(Box::new(copy)),
        Err(err) => {
            record(err);
            ptr::null_mut()
        }
    }
}
