use std::ffi::{CStr, c_int};
use std::sync::{Arc, Mutex, Weak};

use objc2::msg_send;
use objc2::runtime::AnyObject;
use unibridge_common::{NetworkInfoBridge, NetworkInfoHost, Result};

use crate::error::Result as AppleResult;
use crate::lock;
use crate::objc::{self, UnsafeSendRetained};

const NETWORK_INFO_CLASS: &CStr = c"UBNetworkInfo";

/// Host over the UBNetworkInfo singleton. Construction hands the change
/// trampoline to the Objective-C side; `cleanup` releases its observers.
pub struct AppleNetworkInfoHost {
    instance: UnsafeSendRetained<AnyObject>,
}

impl AppleNetworkInfoHost {
    pub(crate) fn new() -> AppleResult<Self> {
        let instance = objc::shared_instance(NETWORK_INFO_CLASS)?;
        let callback = network_type_changed_trampoline as unsafe extern "C" fn(c_int);
        unsafe {
            let _: () = msg_send![
                &*instance.inner,
                setAccessTechnologyChangedCallback: callback
            ];
        }
        Ok(Self { instance })
    }
}

impl NetworkInfoHost for AppleNetworkInfoHost {
    fn current_network_type(&self) -> Result<i32> {
        let network_type: c_int =
            unsafe { msg_send![&*self.instance.inner, getCurrentAccessTechnology] };
        Ok(network_type)
    }

    fn deinit(&self) -> Result<()> {
        unsafe {
            let _: () = msg_send![&*self.instance.inner, cleanup];
        }
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<NetworkInfoBridge<AppleNetworkInfoHost>>>> =
    Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<NetworkInfoBridge<AppleNetworkInfoHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<NetworkInfoBridge<AppleNetworkInfoHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Handed to UBNetworkInfo; invoked on every radio technology change.
unsafe extern "C" fn network_type_changed_trampoline(network_type: c_int) {
    if let Some(bridge) = registered_bridge() {
        bridge.type_changed(network_type);
    }
}
