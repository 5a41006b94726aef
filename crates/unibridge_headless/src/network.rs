use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use unibridge_common::{NetworkInfoHost, NetworkType, Result};

use crate::lock;

type ChangeSink = Box<dyn Fn(i32) + Send + Sync>;

#[derive(Default)]
struct NetworkShared {
    current: AtomicI32,
    listening: AtomicBool,
    change_sink: Mutex<Option<ChangeSink>>,
}

/// Driver handle for the in-memory connectivity state.
#[derive(Clone)]
pub struct HeadlessNetwork {
    shared: Arc<NetworkShared>,
}

impl HeadlessNetwork {
    pub(crate) fn new() -> Self {
        let shared = NetworkShared::default();
        shared
            .current
            .store(NetworkType::Unknown.raw(), Ordering::SeqCst);
        Self {
            shared: Arc::new(shared),
        }
    }

    pub(crate) fn host(&self) -> HeadlessNetworkInfoHost {
        HeadlessNetworkInfoHost {
            shared: self.shared.clone(),
        }
    }

    pub(crate) fn set_change_sink(&self, sink: impl Fn(i32) + Send + Sync + 'static) {
        *lock(&self.shared.change_sink) = Some(Box::new(sink));
    }

    pub(crate) fn start_listening(&self) {
        self.shared.listening.store(true, Ordering::SeqCst);
    }

    /// Whether the change receiver is still registered (deinit clears it).
    pub fn is_listening(&self) -> bool {
        self.shared.listening.load(Ordering::SeqCst)
    }

    /// Updates the current type without notifying, as if the radio changed
    /// while no receiver was registered.
    pub fn set_current_type(&self, raw_type: i32) {
        self.shared.current.store(raw_type, Ordering::SeqCst);
    }

    /// Updates the current type and notifies the registered receiver, the
    /// order the platform uses.
    pub fn change_type(&self, raw_type: i32) {
        self.shared.current.store(raw_type, Ordering::SeqCst);
        if !self.shared.listening.load(Ordering::SeqCst) {
            return;
        }
        if let Some(sink) = &*lock(&self.shared.change_sink) {
            sink(raw_type);
        }
    }
}

pub struct HeadlessNetworkInfoHost {
    shared: Arc<NetworkShared>,
}

impl NetworkInfoHost for HeadlessNetworkInfoHost {
    fn current_network_type(&self) -> Result<i32> {
        Ok(self.shared.current.load(Ordering::SeqCst))
    }

    fn deinit(&self) -> Result<()> {
        self.shared.listening.store(false, Ordering::SeqCst);
        Ok(())
    }
}
