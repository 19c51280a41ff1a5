//! Typed list runtime (`libtlist_rt`)
//!
//! C-ABI entry points that compiled code calls to create and manipulate
//! typed lists. The code generator never sees a list's layout: every list is
//! an opaque, heap-allocated handle, and every operation goes through one of
//! the functions below.
//!
//! # Build Modes
//!
//! - **rlib**: For Rust consumers (JIT execution, tests)
//! - **staticlib**: For AOT linking (`libtlist_rt.a`)
//!
//! # Function Categories
//!
//! - **Scalar lists**: `tl_list_i64_*`, `tl_list_f64_*`, `tl_list_bool_*`
//! - **Reference lists**: `tl_list_ref_*`, bound to a host [`RefHooks`] table.
//!   Counting the references themselves is the host's job; the list only
//!   calls the table's `acquire` and `release`.
//! - **Errors**: `tl_last_error_kind`, `tl_last_error_message`,
//!   `tl_clear_error`
//!
//! # Error Protocol
//!
//! Fallible operations return an `i32` status: `0` on success, otherwise the
//! error kind's code (see [`ListErrorKind::code`]). Constructors return a
//! null handle instead. Either way the failing error is parked in a
//! thread-local slot until the next failure or `tl_clear_error`.
//!
//! # Safety
//!
//! All functions use `#[no_mangle]` and `extern "C"` for FFI compatibility.
//! Handles and out-pointers come from generated code, which guarantees they
//! are either null or valid. They're not marked `unsafe` because they're
//! FFI entry points, not Rust API functions.

#![allow(
    unsafe_code,
    reason = "C-ABI runtime functions require unsafe for raw pointer operations"
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from generated code which guarantees validity"
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "FFI code uses i64 for ABI compatibility"
)]

mod error;
pub mod list;
#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use error::{take_last_error, tl_clear_error, tl_last_error_kind, tl_last_error_message, TlStr};
pub use list::{TlRefList, TlSlice};

pub use tlist_core::{ListError, ListErrorKind, RefHooks};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=tlist=trace` or `RUST_LOG=tlist_rt=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
