use std::ffi::{CStr, c_char, c_void};
use std::sync::{Arc, Mutex, Weak};

use objc2::msg_send;
use objc2::runtime::AnyObject;
use objc2::ClassType;
use objc2_foundation::{NSData, NSString};
use unibridge_common::{Result, ShareRequest, SharingBridge, SharingHost};

use crate::error::Result as AppleResult;
use crate::lock;
use crate::objc::{self, UnsafeSendRetained};

const SHARING_CLASS: &CStr = c"UBSharingManager";

/// Host over the UBSharingManager singleton; the activity view controller
/// lives on the Objective-C side.
pub struct AppleSharingHost {
    instance: UnsafeSendRetained<AnyObject>,
}

impl AppleSharingHost {
    pub(crate) fn new() -> AppleResult<Self> {
        Ok(Self {
            instance: objc::shared_instance(SHARING_CLASS)?,
        })
    }
}

impl SharingHost for AppleSharingHost {
    fn is_showing(&self) -> Result<bool> {
        let showing: bool = unsafe { msg_send![&*self.instance.inner, isShowing] };
        Ok(showing)
    }

    fn share(&self, request: &ShareRequest<'_>) -> Result<()> {
        let text = NSString::from_str(request.text);
        let url = NSString::from_str(request.url);
        // The NSData wraps the caller's bytes without a copy; the buffer
        // must outlive the call. A zero-length image becomes nil.
        let image: Option<objc2::rc::Retained<NSData>> = if request.image.is_empty() {
            None
        } else {
            unsafe {
                msg_send![
                    NSData::class(),
                    dataWithBytesNoCopy: request.image.as_ptr() as *mut c_void,
                    length: request.image.len(),
                    freeWhenDone: false
                ]
            }
        };
        let callback =
            sharing_finished_trampoline as unsafe extern "C" fn(*const c_char, bool);
        unsafe {
            let _: () = msg_send![
                &*self.instance.inner,
                shareWithText: &*text,
                url: &*url,
                data: image.as_deref(),
                callback: callback
            ];
        }
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<SharingBridge<AppleSharingHost>>>> = Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<SharingBridge<AppleSharingHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<SharingBridge<AppleSharingHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Handed to UBSharingManager; invoked once when the share sheet closes.
/// The destination string is only valid for the duration of the callback.
unsafe extern "C" fn sharing_finished_trampoline(destination: *const c_char, completed: bool) {
    let destination = if destination.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(destination) }
            .to_string_lossy()
            .into_owned()
    };
    if let Some(bridge) = registered_bridge() {
        bridge.finished(destination, completed);
    }
}
