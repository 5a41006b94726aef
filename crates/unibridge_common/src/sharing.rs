use std::sync::Mutex;

use crate::error::Result;
use crate::{ShareRequest, SharingHost, SubmitOutcome, lock};

type FinishedHandler = Box<dyn FnOnce(String, bool) + Send>;

/// OS share sheet bridge.
///
/// Same single-outstanding-operation discipline as the popup bridge: the
/// pending completion handler is the busy flag, a `share` issued while a
/// sheet is open is dropped silently, and the completion is delivered at
/// most once per accepted call.
pub struct SharingBridge<H: SharingHost> {
    host: H,
    pending: Mutex<Option<FinishedHandler>>,
}

impl<H: SharingHost> SharingBridge<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: Mutex::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_showing(&self) -> Result<bool> {
        if lock(&self.pending).is_some() {
            return Ok(true);
        }
        self.host.is_showing()
    }

    /// Asks the platform to open the share sheet.
    ///
    /// The image bytes in `request` cross the boundary without a copy; the
    /// caller keeps the buffer alive for the duration of this call. An
    /// empty image is legal and shares text/url only.
    pub fn share(
        &self,
        request: &ShareRequest<'_>,
        on_finished: impl FnOnce(String, bool) + Send + 'static,
    ) -> Result<SubmitOutcome> {
        request.validate()?;
        {
            let mut pending = lock(&self.pending);
            if pending.is_some() || self.host.is_showing()? {
                return Ok(SubmitOutcome::Busy);
            }
            *pending = Some(Box::new(on_finished));
        }
        if let Err(err) = self.host.share(request) {
            lock(&self.pending).take();
            return Err(err);
        }
        Ok(SubmitOutcome::Accepted)
    }

    /// Platform entry point: the share sheet closed. `destination` names
    /// the target the user picked; empty plus `completed == false` means
    /// cancelled. Runs the stored handler on the calling thread, at most
    /// once per accepted `share`.
    pub fn finished(&self, destination: String, completed: bool) {
        let handler = lock(&self.pending).take();
        if let Some(handler) = handler {
            handler(destination, completed);
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

    #[derive(Clone, Default)]
    struct TestHost {
        state: Arc<TestHostState>,
    }

    #[derive(Default)]
    struct TestHostState {
        showing: AtomicBool,
        shared: Mutex<Vec<(String, String, Vec<u8>)>>,
    }

    impl SharingHost for TestHost {
        fn is_showing(&self) -> Result<bool> {
            Ok(self.state.showing.load(Ordering::SeqCst))
        }

        fn share(&self, request: &ShareRequest<'_>) -> Result<()> {
            self.state.shared.lock().unwrap().push((
                request.text.to_string(),
                request.url.to_string(),
                request.image.to_vec(),
            ));
            self.state.showing.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn completely_empty_request_is_rejected() {
        let bridge = SharingBridge::new(TestHost::default());
        let request = ShareRequest {
            text: "",
            url: "",
            image: &[],
        };
        let err = bridge.share(&request, |_, _| {}).unwrap_err();
        assert!(matches!(err, CommonError::NothingToShare));
    }

    #[test]
    fn empty_image_is_accepted_and_completes() {
        let host = TestHost::default();
        let bridge = SharingBridge::new(host.clone());
        let (tx, rx) = mpsc::channel();
        let request = ShareRequest {
            text: "hello",
            url: "https://example.com",
            image: &[],
        };
        let outcome = bridge
            .share(&request, move |destination, completed| {
                tx.send((destination, completed)).unwrap();
            })
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);

        host.state.showing.store(false, Ordering::SeqCst);
        bridge.finished("mail".to_string(), true);
        assert_eq!(rx.try_recv().unwrap(), ("mail".to_string(), true));
    }

    #[test]
    fn image_bytes_reach_the_host_unchanged() {
        let host = TestHost::default();
        let bridge = SharingBridge::new(host.clone());
        let image = [0x89u8, 0x50, 0x4e, 0x47];
        let request = ShareRequest {
            text: "screenshot",
            url: "",
            image: &image,
        };
        bridge.share(&request, |_, _| {}).unwrap();
        let shared = host.state.shared.lock().unwrap();
        assert_eq!(shared[0].2, image);
    }

    #[test]
    fn second_share_is_dropped_while_the_sheet_is_open() {
        let host = TestHost::default();
        let bridge = SharingBridge::new(host.clone());
        let request = ShareRequest {
            text: "once",
            url: "",
            image: &[],
        };
        assert_eq!(
            bridge.share(&request, |_, _| {}).unwrap(),
            SubmitOutcome::Accepted
        );
        assert_eq!(
            bridge.share(&request, |_, _| {}).unwrap(),
            SubmitOutcome::Busy
        );
        assert_eq!(host.state.shared.lock().unwrap().len(), 1);
    }

    #[test]
    fn cancelled_share_reports_an_empty_destination() {
        let bridge = SharingBridge::new(TestHost::default());
        let (tx, rx) = mpsc::channel();
        let request = ShareRequest {
            text: "hello",
            url: "",
            image: &[],
        };
        bridge
            .share(&request, move |destination, completed| {
                tx.send((destination, completed)).unwrap();
            })
            .unwrap();
        bridge.finished(String::new(), false);
        assert_eq!(rx.try_recv().unwrap(), (String::new(), false));
    }

    #[test]
    fn completion_is_delivered_at_most_once() {
        let bridge = SharingBridge::new(TestHost::default());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let request = ShareRequest {
            text: "hello",
            url: "",
            image: &[],
        };
        bridge
            .share(&request, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        bridge.finished("mail".to_string(), true);
        bridge.finished("mail".to_string(), true);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
