use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::{NetworkInfoHost, NetworkType, lock};

type TypeChangedHandler = Arc<dyn Fn(NetworkType) + Send + Sync>;

/// Network/radio access technology bridge.
pub struct NetworkInfoBridge<H: NetworkInfoHost> {
    host: H,
    handler: Mutex<Option<TypeChangedHandler>>,
}

impl<H: NetworkInfoHost> NetworkInfoBridge<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            handler: Mutex::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct synchronous query against the platform connectivity API.
    /// Never cached.
    pub fn current_network_type(&self) -> Result<NetworkType> {
        Ok(NetworkType::from_raw(self.host.current_network_type()?))
    }

    /// Registers the change handler. Single slot, last-register-wins: the
    /// previous handler stops firing the moment the new one is stored.
    pub fn set_type_changed_handler(
        &self,
        handler: impl Fn(NetworkType) + Send + Sync + 'static,
    ) {
        *lock(&self.handler) = Some(Arc::new(handler));
    }

    pub fn clear_type_changed_handler(&self) {
        lock(&self.handler).take();
    }

    /// Platform entry point: the radio access technology changed. Fires the
    /// registered handler on the calling thread; one firing per change, no
    /// upper bound on the number of notifications.
    pub fn type_changed(&self, raw_type: i32) {
        let handler = lock(&self.handler).clone();
        if let Some(handler) = handler {
            handler(NetworkType::from_raw(raw_type));
        }
    }

    /// Releases the platform-side listeners. Safe to call repeatedly; the
    /// registered handler stays in place for a later re-init.
    pub fn cleanup(&self) -> Result<()> {
        self.host.deinit()
    }
}

impl<H: NetworkInfoHost> Drop for NetworkInfoBridge<H> {
    fn drop(&mut self) {
        // unload performs the same teardown as an explicit cleanup()
        if let Err(err) = self.host.deinit() {
            println!("unibridge: network info deinit on drop failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct TestHost {
        state: Arc<TestHostState>,
    }

    #[derive(Default)]
    struct TestHostState {
        current: AtomicI32,
        deinit_calls: AtomicUsize,
    }

    impl NetworkInfoHost for TestHost {
        fn current_network_type(&self) -> Result<i32> {
            Ok(self.state.current.load(Ordering::SeqCst))
        }

        fn deinit(&self) -> Result<()> {
            self.state.deinit_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn query_maps_the_raw_platform_value() {
        let host = TestHost::default();
        host.state.current.store(14, Ordering::SeqCst);
        let bridge = NetworkInfoBridge::new(host);
        assert_eq!(bridge.current_network_type().unwrap(), NetworkType::Lte);
    }

    #[test]
    fn handler_fires_on_every_change() {
        let bridge = NetworkInfoBridge::new(TestHost::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bridge.set_type_changed_handler(move |ty| sink.lock().unwrap().push(ty));
        bridge.type_changed(4);
        bridge.type_changed(14);
        bridge.type_changed(14);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![NetworkType::Edge, NetworkType::Lte, NetworkType::Lte]
        );
    }

    #[test]
    fn last_registered_handler_wins() {
        let bridge = NetworkInfoBridge::new(TestHost::default());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let counter = first.clone();
        bridge.set_type_changed_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = second.clone();
        bridge.set_type_changed_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bridge.type_changed(5);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cleared_handler_stops_firing() {
        let bridge = NetworkInfoBridge::new(TestHost::default());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        bridge.set_type_changed_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bridge.clear_type_changed_handler();
        bridge.type_changed(5);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cleanup_forwards_to_the_platform_and_is_repeatable() {
        let host = TestHost::default();
        let bridge = NetworkInfoBridge::new(host.clone());
        bridge.cleanup().unwrap();
        bridge.cleanup().unwrap();
        assert_eq!(host.state.deinit_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_the_bridge_deinitializes_the_platform() {
        let host = TestHost::default();
        {
            let _bridge = NetworkInfoBridge::new(host.clone());
        }
        assert_eq!(host.state.deinit_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn query_agrees_with_the_latest_notification() {
        let host = TestHost::default();
        let bridge = NetworkInfoBridge::new(host.clone());
        let last = Arc::new(AtomicI32::new(NetworkType::Unknown.raw()));
        let sink = last.clone();
        bridge.set_type_changed_handler(move |ty| sink.store(ty.raw(), Ordering::SeqCst));

        // the platform updates its state, then notifies
        host.state.current.store(10, Ordering::SeqCst);
        bridge.type_changed(10);

        let notified = NetworkType::from_raw(last.load(Ordering::SeqCst));
        assert_eq!(bridge.current_network_type().unwrap(), notified);
    }
}
