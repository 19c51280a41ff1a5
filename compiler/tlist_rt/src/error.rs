//! Thread-local error surfacing for compiled code.

use std::cell::RefCell;

use tlist_core::{ListError, ListErrorKind, ListResult};

/// Borrowed string crossing the ABI: `{ i64 len, *const u8 data }`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct TlStr {
    pub len: i64,
    pub data: *const u8,
}

impl TlStr {
    pub const EMPTY: TlStr = TlStr {
        len: 0,
        data: std::ptr::null(),
    };

    /// Convert to a Rust string slice.
    ///
    /// # Safety
    ///
    /// `data` must point to `len` bytes of valid UTF-8 that outlive `'a`.
    pub unsafe fn as_str<'a>(&self) -> &'a str {
        if self.data.is_null() || self.len <= 0 {
            return "";
        }
        let bytes = std::slice::from_raw_parts(self.data, self.len as usize);
        std::str::from_utf8_unchecked(bytes)
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<ListError>> = const { RefCell::new(None) };
}

/// Park `err` for the caller and return its status code.
pub(crate) fn record(err: ListError) -> i32 {
    let code = err.kind.code();
    tracing::debug!(kind = %err.kind, message = %err.message, "list operation failed");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err));
    code
}

/// Status code for a unit result.
pub(crate) fn status(result: ListResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => record(err),
    }
}

/// A null list or hook handle reached the runtime.
#[cold]
pub(crate) fn null_handle() -> ListError {
    ListError::new(ListErrorKind::Type, "list handle is null")
}

/// Take the last error recorded on this thread, clearing the slot.
pub fn take_last_error() -> Option<ListError> {
    LAST_ERROR.with(|slot| slot.borrow_mut().take())
}

/// Status code of the last error on this thread, or `0` if none.
#[no_mangle]
pub extern "C" fn tl_last_error_kind() -> i32 {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(0, |err| err.kind.code()))
}

/// Message of the last error on this thread, or an empty string.
///
/// The returned string is borrowed from the runtime and stays valid until
/// the next failing call or `tl_clear_error` on this thread.
#[no_mangle]
pub extern "C" fn tl_last_error_message() -> TlStr {
    LAST_ERROR.with(|slot| {
        slot.borrow().as_ref().map_or(TlStr::EMPTY, |err| TlStr {
            len: err.message.len() as i64,
            data: err.message.as_ptr(),
        })
    })
}

/// Discard the last error on this thread.
#[no_mangle]
pub extern "C" fn tl_clear_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}
