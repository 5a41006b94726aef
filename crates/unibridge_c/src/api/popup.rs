use std::ffi::c_char;
use std::os::raw::c_void;

use unibridge::{PopupRequest, SubmitOutcome};

use crate::*;

/// Shows a native popup dialog.
///
/// Returns true when the dialog was accepted; `on_dismissed` then fires
/// exactly once with the pressed button index (`-1` = closed without a
/// button). Returns false without any callback when a dialog is already on
/// screen, and false with an `on_error` callback on invalid input or a
/// platform failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_popup_show(
    bridges: *const PlatformBridges,
    title: *const c_char,
    message: *const c_char,
    button_labels: *const *const c_char,
    button_count: usize,
    on_dismissed: usize, /*PopupDismissedCallback*/
    on_error: usize,     /*BridgeCallback*/
    user_data: SendPtr<c_void>,
) -> bool {
    let on_dismissed: PopupDismissedCallback = unsafe { std::mem::transmute(on_dismissed) };
    let on_error: BridgeCallback = unsafe { std::mem::transmute(on_error) };
    if bridges.is_null()
        || title.is_null()
        || message.is_null()
        || (button_count > 0 && button_labels.is_null())
    {
        BridgeError::invalid_input_error("Invalid input parameters")
            .apply_callback(on_error, user_data);
        return false;
    }
    let bridges = unsafe { &*bridges };

    let result = (|| -> Result<SubmitOutcome, BridgeError> {
        let title = unsafe { decode_str(title) }?;
        let message = unsafe { decode_str(message) }?;
        let labels: &[*const c_char] = if button_count == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(button_labels, button_count) }
        };
        let mut buttons = Vec::with_capacity(button_count);
        for &label in labels {
            if label.is_null() {
                return Err(BridgeError::invalid_input_error("Button label is null"));
            }
            buttons.push(unsafe { decode_str(label) }?);
        }
        let request = PopupRequest {
            title,
            message,
            buttons: &buttons,
        };
        bridges
            .popup
            .show(&request, move |button_index| unsafe {
                on_dismissed(user_data.into(), button_index)
            })
            .map_err(BridgeError::from_common)
    })();

    match result {
        // a Busy drop is silent: no error, no callback
        Ok(outcome) => outcome.is_accepted(),
        Err(err) => {
            err.apply_callback(on_error, user_data);
            false
        }
    }
}
