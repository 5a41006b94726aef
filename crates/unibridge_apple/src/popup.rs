use std::ffi::{CStr, c_int};
use std::sync::{Arc, Mutex, Weak};

use objc2::msg_send;
use objc2::runtime::AnyObject;
use objc2_foundation::{NSArray, NSString};
use unibridge_common::{PopupBridge, PopupHost, PopupRequest, Result};

use crate::error::Result as AppleResult;
use crate::lock;
use crate::objc::{self, UnsafeSendRetained};

const POPUP_CLASS: &CStr = c"UBNativePopup";

/// Host over the UBNativePopup singleton; the alert controller itself lives
/// on the Objective-C side.
pub struct ApplePopupHost {
    instance: UnsafeSendRetained<AnyObject>,
}

impl ApplePopupHost {
    pub(crate) fn new() -> AppleResult<Self> {
        Ok(Self {
            instance: objc::shared_instance(POPUP_CLASS)?,
        })
    }
}

impl PopupHost for ApplePopupHost {
    fn is_showing(&self) -> Result<bool> {
        let showing: bool = unsafe { msg_send![&*self.instance.inner, isShowing] };
        Ok(showing)
    }

    fn show(&self, request: &PopupRequest<'_>) -> Result<()> {
        let title = NSString::from_str(request.title);
        let message = NSString::from_str(request.message);
        let labels: Vec<_> = request
            .buttons
            .iter()
            .map(|label| NSString::from_str(label))
            .collect();
        let buttons = NSArray::from_retained_slice(&labels);
        let callback = popup_dismissed_trampoline as unsafe extern "C" fn(c_int);
        unsafe {
            let _: () = msg_send![
                &*self.instance.inner,
                showWithTitle: &*title,
                message: &*message,
                buttons: &*buttons,
                callback: callback
            ];
        }
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<PopupBridge<ApplePopupHost>>>> = Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<PopupBridge<ApplePopupHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<PopupBridge<ApplePopupHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Handed to UBNativePopup; invoked on the main queue when the dialog is
/// dismissed.
unsafe extern "C" fn popup_dismissed_trampoline(button_index: c_int) {
    if let Some(bridge) = registered_bridge() {
        bridge.dismissed(button_index);
    }
}
