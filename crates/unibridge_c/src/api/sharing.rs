use std::ffi::{CString, c_char};
use std::os::raw::c_void;

use unibridge::{ShareRequest, SubmitOutcome};

use crate::*;

/// Opens the OS share sheet.
///
/// The image bytes are handed to the platform without a copy; the caller
/// keeps the buffer alive for the duration of this call. `image_bytes` may
/// be null when `image_length` is 0. Returns true when the share was
/// accepted; `on_finished` then fires exactly once with the destination the
/// user picked (empty + `completed == false` for cancelled; the string is
/// only valid inside the callback). Returns false without any callback when
/// a share sheet is already open.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_sharing_share(
    bridges: *const PlatformBridges,
    text: *const c_char,
    url: *const c_char,
    image_bytes: *const u8,
    image_length: usize,
    on_finished: usize, /*SharingFinishedCallback*/
    on_error: usize,    /*BridgeCallback*/
    user_data: SendPtr<c_void>,
) -> bool {
    let on_finished: SharingFinishedCallback = unsafe { std::mem::transmute(on_finished) };
    let on_error: BridgeCallback = unsafe { std::mem::transmute(on_error) };
    if bridges.is_null()
        || text.is_null()
        || url.is_null()
        || (image_length > 0 && image_bytes.is_null())
    {
        BridgeError::invalid_input_error("Invalid input parameters")
            .apply_callback(on_error, user_data);
        return false;
    }
    let bridges = unsafe { &*bridges };

    let result = (|| -> Result<SubmitOutcome, BridgeError> {
        let text = unsafe { decode_str(text) }?;
        let url = unsafe { decode_str(url) }?;
        let image: &[u8] = if image_length == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(image_bytes, image_length) }
        };
        let request = ShareRequest { text, url, image };
        bridges
            .sharing
            .share(&request, move |destination, completed| {
                let destination = CString::new(destination).unwrap_or_default();
                unsafe { on_finished(user_data.into(), destination.as_ptr(), completed) };
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
