use std::sync::{Arc, Mutex, MutexGuard};

pub mod error;
mod network;
mod popup;
mod sharing;

pub use error::{CategorizedError, CommonError, ErrorCategory, OptionExt, Result, ResultExt};
pub use network::NetworkInfoBridge;
pub use popup::PopupBridge;
pub use sharing::SharingBridge;

pub trait PopupHost: Send + Sync + 'static {
    fn is_showing(&self) -> Result<bool>;
    fn show(&self, request: &PopupRequest<'_>) -> Result<()>;
}

pub trait NetworkInfoHost: Send + Sync + 'static {
    /// Raw platform value; mapped to [`NetworkType`] by the bridge.
    fn current_network_type(&self) -> Result<i32>;
    fn deinit(&self) -> Result<()>;
}

pub trait SharingHost: Send + Sync + 'static {
    fn is_showing(&self) -> Result<bool>;
    fn share(&self, request: &ShareRequest<'_>) -> Result<()>;
}

/// One platform backend: constructs the three bridges over its host types
/// and wires the platform's inbound callbacks to them.
pub trait BridgeSystem: Sized + Send + Sync + 'static {
    type PopupHostType: PopupHost;
    type NetworkInfoHostType: NetworkInfoHost;
    type SharingHostType: SharingHost;

    fn new() -> Result<Self>;
    fn new_popup_bridge(&self) -> Result<Arc<PopupBridge<Self::PopupHostType>>>;
    fn new_network_info_bridge(
        &self,
    ) -> Result<Arc<NetworkInfoBridge<Self::NetworkInfoHostType>>>;
    fn new_sharing_bridge(&self) -> Result<Arc<SharingBridge<Self::SharingHostType>>>;
}

#[derive(Clone, Copy, Debug)]
pub struct PopupRequest<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub buttons: &'a [&'a str],
}

impl PopupRequest<'_> {
    pub fn validate(&self) -> Result<()> {
        if self.buttons.is_empty() {
            return Err(CommonError::NoButtonLabels);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ShareRequest<'a> {
    pub text: &'a str,
    pub url: &'a str,
    /// Borrowed image bytes, handed to the platform without a copy. The
    /// backing buffer must stay alive for the duration of the call.
    pub image: &'a [u8],
}

impl ShareRequest<'_> {
    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() && self.url.is_empty() && self.image.is_empty() {
            return Err(CommonError::NothingToShare);
        }
        Ok(())
    }
}

/// Result of submitting a popup or share to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// Dropped because a dialog or share sheet is already on screen.
    Busy,
}

impl SubmitOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Radio access technologies, ordered roughly by speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum NetworkType {
    Unknown = -1,
    OneXRtt = 0,
    Cdma = 1,
    Iden = 2,
    Gprs = 3,
    Edge = 4,
    Umts = 5,
    EvdoRev0 = 6,
    EvdoRevA = 7,
    EvdoRevB = 8,
    Ehrpd = 9,
    Hspa = 10,
    Hsdpa = 11,
    Hsupa = 12,
    Hspap = 13,
    Lte = 14,
}

impl NetworkType {
    /// Maps the raw platform value; anything outside the scale collapses to
    /// `Unknown`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => NetworkType::OneXRtt,
            1 => NetworkType::Cdma,
            2 => NetworkType::Iden,
            3 => NetworkType::Gprs,
            4 => NetworkType::Edge,
            5 => NetworkType::Umts,
            6 => NetworkType::EvdoRev0,
            7 => NetworkType::EvdoRevA,
            8 => NetworkType::EvdoRevB,
            9 => NetworkType::Ehrpd,
            10 => NetworkType::Hspa,
            11 => NetworkType::Hsdpa,
            12 => NetworkType::Hsupa,
            13 => NetworkType::Hspap,
            14 => NetworkType::Lte,
            _ => NetworkType::Unknown,
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Anything faster than EDGE counts as fast, the same cut the platform
    /// classes use.
    pub fn is_fast(self) -> bool {
        self > NetworkType::Edge
    }
}

// Locks are only ever held around slot reads/writes; a poisoned lock means a
// platform callback panicked mid-swap, and the slot state is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::NetworkType;

    #[test]
    fn raw_values_round_trip() {
        for raw in -1..=14 {
            assert_eq!(NetworkType::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn out_of_scale_values_collapse_to_unknown() {
        assert_eq!(NetworkType::from_raw(99), NetworkType::Unknown);
        assert_eq!(NetworkType::from_raw(-7), NetworkType::Unknown);
    }

    #[test]
    fn fast_starts_above_edge() {
        assert!(!NetworkType::Unknown.is_fast());
        assert!(!NetworkType::Edge.is_fast());
        assert!(NetworkType::Umts.is_fast());
        assert!(NetworkType::Lte.is_fast());
    }
}
