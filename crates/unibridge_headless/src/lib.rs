//! In-process backend for targets without native dialogs (Unity editor,
//! batch mode, CI). Pending dialogs and share sheets are held in memory and
//! resolved programmatically through the driver handles, obeying the same
//! state machine as the real platforms.

use std::sync::{Arc, Mutex, MutexGuard};

use unibridge_common::{
    BridgeSystem, NetworkInfoBridge, PopupBridge, Result, SharingBridge,
};

mod network;
mod popup;
mod sharing;

pub use network::{HeadlessNetwork, HeadlessNetworkInfoHost};
pub use popup::{HeadlessPopup, HeadlessPopupHost, PendingPopup};
pub use sharing::{HeadlessSharing, HeadlessSharingHost, PendingShare};

pub struct HeadlessBridgeSystem {
    popup: HeadlessPopup,
    network: HeadlessNetwork,
    sharing: HeadlessSharing,
}

impl HeadlessBridgeSystem {
    /// Driver handle standing in for the platform popup UI.
    pub fn popup(&self) -> &HeadlessPopup {
        &self.popup
    }

    /// Driver handle standing in for the platform connectivity service.
    pub fn network(&self) -> &HeadlessNetwork {
        &self.network
    }

    /// Driver handle standing in for the platform share sheet.
    pub fn sharing(&self) -> &HeadlessSharing {
        &self.sharing
    }
}

impl BridgeSystem for HeadlessBridgeSystem {
    type PopupHostType = HeadlessPopupHost;
    type NetworkInfoHostType = HeadlessNetworkInfoHost;
    type SharingHostType = HeadlessSharingHost;

    fn new() -> Result<Self> {
        Ok(Self {
            popup: HeadlessPopup::new(),
            network: HeadlessNetwork::new(),
            sharing: HeadlessSharing::new(),
        })
    }

    fn new_popup_bridge(&self) -> Result<Arc<PopupBridge<HeadlessPopupHost>>> {
        let bridge = Arc::new(PopupBridge::new(self.popup.host()));
        let weak = Arc::downgrade(&bridge);
        self.popup.set_dismiss_sink(move |button_index| {
            if let Some(bridge) = weak.upgrade() {
                bridge.dismissed(button_index);
            }
        });
        Ok(bridge)
    }

    fn new_network_info_bridge(
        &self,
    ) -> Result<Arc<NetworkInfoBridge<HeadlessNetworkInfoHost>>> {
        let bridge = Arc::new(NetworkInfoBridge::new(self.network.host()));
        let weak = Arc::downgrade(&bridge);
        self.network.set_change_sink(move |raw_type| {
            if let Some(bridge) = weak.upgrade() {
                bridge.type_changed(raw_type);
            }
        });
        self.network.start_listening();
        Ok(bridge)
    }

    fn new_sharing_bridge(&self) -> Result<Arc<SharingBridge<HeadlessSharingHost>>> {
        let bridge = Arc::new(SharingBridge::new(self.sharing.host()));
        let weak = Arc::downgrade(&bridge);
        self.sharing.set_finish_sink(move |destination, completed| {
            if let Some(bridge) = weak.upgrade() {
                bridge.finished(destination, completed);
            }
        });
        Ok(bridge)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
