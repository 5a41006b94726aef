use std::sync::{Arc, Mutex, MutexGuard};

use unibridge_common::{
    BridgeSystem, NetworkInfoBridge, PopupBridge, Result as CommonResult, SharingBridge,
};

mod error;
mod network;
mod objc;
mod popup;
mod sharing;

pub use error::{AppleError, Result};
pub use network::AppleNetworkInfoHost;
pub use objc::UnsafeSendRetained;
pub use popup::ApplePopupHost;
pub use sharing::AppleSharingHost;

/// Backend over the plugin's Objective-C singletons. No application context
/// is needed on this side; each bridge constructor resolves its
/// `sharedInstance` and registers itself as the receiver for the class's C
/// callbacks.
pub struct AppleBridgeSystem;

impl BridgeSystem for AppleBridgeSystem {
    type PopupHostType = ApplePopupHost;
    type NetworkInfoHostType = AppleNetworkInfoHost;
    type SharingHostType = AppleSharingHost;

    fn new() -> CommonResult<Self> {
        Ok(Self)
    }

    fn new_popup_bridge(&self) -> CommonResult<Arc<PopupBridge<ApplePopupHost>>> {
        let host = ApplePopupHost::new()?;
        let bridge = Arc::new(PopupBridge::new(host));
        popup::register_bridge(&bridge);
        Ok(bridge)
    }

    fn new_network_info_bridge(
        &self,
    ) -> CommonResult<Arc<NetworkInfoBridge<AppleNetworkInfoHost>>> {
        let host = AppleNetworkInfoHost::new()?;
        let bridge = Arc::new(NetworkInfoBridge::new(host));
        network::register_bridge(&bridge);
        Ok(bridge)
    }

    fn new_sharing_bridge(&self) -> CommonResult<Arc<SharingBridge<AppleSharingHost>>> {
        let host = AppleSharingHost::new()?;
        let bridge = Arc::new(SharingBridge::new(host));
        sharing::register_bridge(&bridge);
        Ok(bridge)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
