use std::os::raw::c_void;

use crate::*;

/// One-time application-start call: binds the platform classes, performs
/// their `init` and hands back the bridge set every other entry point takes
/// by pointer. Reports a categorized error and returns false when a class
/// lookup fails.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_new_bridges(
    bridges_out: *mut *mut PlatformBridges,
    on_error: usize, /*BridgeCallback*/
    user_data: SendPtr<c_void>,
) -> bool {
    let on_error: BridgeCallback = unsafe { std::mem::transmute(on_error) };
    if bridges_out.is_null() {
        BridgeError::invalid_input_error("Invalid output parameter")
            .apply_callback(on_error, user_data);
        return false;
    }
    match PlatformBridges::new() {
        Ok(bridges) => {
            unsafe { *bridges_out = Box::into_raw(Box::new(bridges)) };
            true
        }
        Err(err) => {
            BridgeError::from_common(err).apply_callback(on_error, user_data);
            false
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_free_bridges(bridges: *mut PlatformBridges) {
    if !bridges.is_null() {
        unsafe { drop(Box::from_raw(bridges)) };
    }
}
