use std::sync::Mutex;

use crate::error::Result;
use crate::{PopupHost, PopupRequest, SubmitOutcome, lock};

type DismissedHandler = Box<dyn FnOnce(i32) + Send>;

/// Native popup dialog bridge.
///
/// The pending dismissal handler doubles as the busy flag: `Some` means a
/// dialog is in flight. At most one popup exists at a time; a `show` issued
/// while one is on screen is dropped without an error and without a
/// callback.
pub struct PopupBridge<H: PopupHost> {
    host: H,
    pending: Mutex<Option<DismissedHandler>>,
}

impl<H: PopupHost> PopupBridge<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: Mutex::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether a dialog is in flight, either ours or one the platform
    /// reports on its own.
    pub fn is_showing(&self) -> Result<bool> {
        if lock(&self.pending).is_some() {
            return Ok(true);
        }
        self.host.is_showing()
    }

    /// Asks the platform to show a popup dialog.
    ///
    /// The handler slot is claimed under the lock before the platform call
    /// is issued, so concurrent calls resolve to exactly one accept. A
    /// `Busy` outcome leaves the in-flight dialog and its handler untouched.
    /// If the platform call itself fails, the slot is released again and the
    /// error propagated.
    pub fn show(
        &self,
        request: &PopupRequest<'_>,
        on_dismissed: impl FnOnce(i32) + Send + 'static,
    ) -> Result<SubmitOutcome> {
        request.validate()?;
        {
            let mut pending = lock(&self.pending);
            if pending.is_some() || self.host.is_showing()? {
                return Ok(SubmitOutcome::Busy);
            }
            *pending = Some(Box::new(on_dismissed));
        }
        if let Err(err) = self.host.show(request) {
            lock(&self.pending).take();
            return Err(err);
        }
        Ok(SubmitOutcome::Accepted)
    }

    /// Platform entry point: the dialog was dismissed with the given button
    /// index (`-1` when it was closed without a button press).
    ///
    /// Takes the stored handler and runs it on the calling thread, at most
    /// once per accepted `show`. A dismissal with nothing pending is
    /// ignored.
    pub fn dismissed(&self, button_index: i32) {
        let handler = lock(&self.pending).take();
        if let Some(handler) = handler {
            handler(button_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommonError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct TestHost {
        state: Arc<TestHostState>,
    }

    #[derive(Default)]
    struct TestHostState {
        showing: AtomicBool,
        show_calls: AtomicUsize,
        fail_next_show: AtomicBool,
    }

    impl PopupHost for TestHost {
        fn is_showing(&self) -> Result<bool> {
            Ok(self.state.showing.load(Ordering::SeqCst))
        }

        fn show(&self, _request: &PopupRequest<'_>) -> Result<()> {
            if self.state.fail_next_show.swap(false, Ordering::SeqCst) {
                return Err(CommonError::Other("dialog unavailable".into()));
            }
            self.state.show_calls.fetch_add(1, Ordering::SeqCst);
            self.state.showing.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn request<'a>(buttons: &'a [&'a str]) -> PopupRequest<'a> {
        PopupRequest {
            title: "Title",
            message: "Msg",
            buttons,
        }
    }

    #[test]
    fn empty_button_list_is_rejected_before_the_platform_call() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        let err = bridge.show(&request(&[]), |_| {}).unwrap_err();
        assert!(matches!(err, CommonError::NoButtonLabels));
        assert_eq!(host.state.show_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn second_show_is_dropped_while_one_is_on_screen() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        let first = bridge.show(&request(&["OK"]), |_| {}).unwrap();
        assert_eq!(first, SubmitOutcome::Accepted);
        let second = bridge.show(&request(&["OK"]), |_| {}).unwrap();
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(host.state.show_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_show_does_not_disturb_the_inflight_handler() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        let (tx, rx) = mpsc::channel();
        let first_tx = tx.clone();
        bridge
            .show(&request(&["OK", "Cancel"]), move |i| {
                first_tx.send(("first", i)).unwrap();
            })
            .unwrap();
        let outcome = bridge
            .show(&request(&["OK"]), move |i| {
                tx.send(("second", i)).unwrap();
            })
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Busy);

        host.state.showing.store(false, Ordering::SeqCst);
        bridge.dismissed(1);
        assert_eq!(rx.try_recv().unwrap(), ("first", 1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dismissal_is_delivered_at_most_once() {
        let bridge = PopupBridge::new(TestHost::default());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        bridge
            .show(&request(&["OK"]), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        bridge.dismissed(0);
        bridge.dismissed(0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dismissal_with_nothing_pending_is_ignored() {
        let bridge = PopupBridge::new(TestHost::default());
        bridge.dismissed(-1);
    }

    #[test]
    fn slot_is_free_again_after_dismissal() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        bridge.show(&request(&["OK"]), |_| {}).unwrap();
        host.state.showing.store(false, Ordering::SeqCst);
        bridge.dismissed(0);
        let outcome = bridge.show(&request(&["OK"]), |_| {}).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(host.state.show_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_platform_call_releases_the_slot() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        host.state.fail_next_show.store(true, Ordering::SeqCst);
        assert!(bridge.show(&request(&["OK"]), |_| {}).is_err());
        let outcome = bridge.show(&request(&["OK"]), |_| {}).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
    }

    #[test]
    fn platform_reported_dialog_blocks_new_shows() {
        let host = TestHost::default();
        let bridge = PopupBridge::new(host.clone());
        host.state.showing.store(true, Ordering::SeqCst);
        let outcome = bridge.show(&request(&["OK"]), |_| {}).unwrap();
        assert_eq!(outcome, SubmitOutcome::Busy);
        assert_eq!(host.state.show_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dismissal_runs_on_the_delivering_thread() {
        let bridge = Arc::new(PopupBridge::new(TestHost::default()));
        let (tx, rx) = mpsc::channel();
        bridge
            .show(&request(&["OK", "Cancel"]), move |i| {
                tx.send((std::thread::current().id(), i)).unwrap();
            })
            .unwrap();

        let platform = bridge.clone();
        let handle = std::thread::spawn(move || {
            platform.dismissed(1);
            std::thread::current().id()
        });
        let (seen_thread, index) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let platform_thread = handle.join().unwrap();
        assert_eq!(index, 1);
        assert_eq!(seen_thread, platform_thread);
    }
}
