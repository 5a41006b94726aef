use std::ffi::{CStr, c_char};

use crate::ffi::BridgeError;

/// Borrow a UTF-8 view of a C string for the duration of the call.
///
/// # Safety
/// `ptr` must be a non-null, NUL-terminated string that outlives the
/// returned borrow.
pub unsafe fn decode_str<'a>(ptr: *const c_char) -> Result<&'a str, BridgeError> {
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| BridgeError::invalid_input_error("String argument is not valid UTF-8"))
}
