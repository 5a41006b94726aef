use std::os::raw::c_void;

use crate::*;

/// Synchronous query of the current radio access technology. Writes the raw
/// scale value (-1..14) to `network_type_out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_network_info_current_type(
    bridges: *const PlatformBridges,
    network_type_out: *mut i32,
    on_error: usize, /*BridgeCallback*/
    user_data: SendPtr<c_void>,
) -> bool {
    let on_error: BridgeCallback = unsafe { std::mem::transmute(on_error) };
    if bridges.is_null() || network_type_out.is_null() {
        BridgeError::invalid_input_error("Invalid input parameters")
            .apply_callback(on_error, user_data);
        return false;
    }
    let bridges = unsafe { &*bridges };
    match bridges.network_info.current_network_type() {
        Ok(network_type) => {
            unsafe { *network_type_out = network_type.raw() };
            true
        }
        Err(err) => {
            BridgeError::from_common(err).apply_callback(on_error, user_data);
            false
        }
    }
}

/// Registers the change callback; a single slot, last-register-wins.
/// Passing 0 clears the slot. The callback fires on the platform's own
/// thread, once per change, for as long as the bridges stay alive.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_network_info_set_type_changed_callback(
    bridges: *const PlatformBridges,
    on_type_changed: usize, /*NetworkTypeChangedCallback, 0 clears*/
    user_data: SendPtr<c_void>,
) {
    if bridges.is_null() {
        return;
    }
    let bridges = unsafe { &*bridges };
    if on_type_changed == 0 {
        bridges.network_info.clear_type_changed_handler();
        return;
    }
    let on_type_changed: NetworkTypeChangedCallback =
        unsafe { std::mem::transmute(on_type_changed) };
    bridges
        .network_info
        .set_type_changed_handler(move |network_type| unsafe {
            on_type_changed(user_data.into(), network_type.raw())
        });
}

/// Releases the platform listeners; safe to call repeatedly.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_network_info_cleanup(
    bridges: *const PlatformBridges,
    on_error: usize, /*BridgeCallback*/
    user_data: SendPtr<c_void>,
) -> bool {
    let on_error: BridgeCallback = unsafe { std::mem::transmute(on_error) };
    if bridges.is_null() {
        BridgeError::invalid_input_error("Invalid input parameters")
            .apply_callback(on_error, user_data);
        return false;
    }
    let bridges = unsafe { &*bridges };
    match bridges.network_info.cleanup() {
        Ok(()) => true,
        Err(err) => {
            BridgeError::from_common(err).apply_callback(on_error, user_data);
            false
        }
    }
}
