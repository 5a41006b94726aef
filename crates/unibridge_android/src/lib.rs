use std::ffi::{c_int, c_void};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use jni::JavaVM;
use unibridge_common::{
    BridgeSystem, NetworkInfoBridge, PopupBridge, Result as CommonResult, SharingBridge,
};

mod error;
mod java;
mod network;
mod popup;
mod sharing;

pub use error::{AndroidError, Result};
pub use java::SafeGlobalRef;
pub use network::AndroidNetworkInfoHost;
pub use popup::AndroidPopupHost;
pub use sharing::AndroidSharingHost;

static JAVA_VM: OnceLock<jni::JavaVM> = OnceLock::new();

const JNI_VERSION_1_6: c_int = 0x0001_0006;

/// Store the JavaVM handed to JNI_OnLoad. Returns the JNI version to report
/// back to the VM, or 0 when the handle is unusable.
pub unsafe fn set_java_vm(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> c_int {
    println!("JNI_OnLoad: {:?}", vm);
    match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => {
            let _ = JAVA_VM.set(vm);
            JNI_VERSION_1_6
        }
        Err(_) => 0,
    }
}

/// Backend over the plugin's Java classes. Construction resolves the Unity
/// activity; each bridge constructor binds its class, performs the one-time
/// static `init(Context)` call and registers itself as the receiver for the
/// class's native callbacks.
pub struct AndroidBridgeSystem {
    activity: SafeGlobalRef,
}

impl BridgeSystem for AndroidBridgeSystem {
    type PopupHostType = AndroidPopupHost;
    type NetworkInfoHostType = AndroidNetworkInfoHost;
    type SharingHostType = AndroidSharingHost;

    fn new() -> CommonResult<Self> {
        let mut env = java::attach_current_thread()?;
        let activity = java::current_activity(&mut env)?;
        Ok(Self { activity })
    }

    fn new_popup_bridge(&self) -> CommonResult<Arc<PopupBridge<AndroidPopupHost>>> {
        let host = AndroidPopupHost::new(&self.activity)?;
        let bridge = Arc::new(PopupBridge::new(host));
        popup::register_bridge(&bridge);
        Ok(bridge)
    }

    fn new_network_info_bridge(
        &self,
    ) -> CommonResult<Arc<NetworkInfoBridge<AndroidNetworkInfoHost>>> {
        let host = AndroidNetworkInfoHost::new(&self.activity)?;
        let bridge = Arc::new(NetworkInfoBridge::new(host));
        network::register_bridge(&bridge);
        Ok(bridge)
    }

    fn new_sharing_bridge(&self) -> CommonResult<Arc<SharingBridge<AndroidSharingHost>>> {
        let host = AndroidSharingHost::new(&self.activity)?;
        let bridge = Arc::new(SharingBridge::new(host));
        sharing::register_bridge(&bridge);
        Ok(bridge)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
