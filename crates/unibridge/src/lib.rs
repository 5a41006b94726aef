mod platform;

use std::sync::Arc;

pub use platform::PlatformBridgeSystem;
pub use unibridge_common::{
    BridgeSystem, CategorizedError, CommonError, ErrorCategory, NetworkInfoBridge,
    NetworkInfoHost, NetworkType, OptionExt, PopupBridge, PopupHost, PopupRequest, Result,
    ResultExt, ShareRequest, SharingBridge, SharingHost, SubmitOutcome,
};

#[cfg(target_os = "android")]
pub use unibridge_android as android;
#[cfg(target_vendor = "apple")]
pub use unibridge_apple as apple;

/// The three bridges of one backend, constructed together in a single
/// application-start phase and handed out by reference to every call site.
pub struct Bridges<S: BridgeSystem> {
    pub system: S,
    pub popup: Arc<PopupBridge<S::PopupHostType>>,
    pub network_info: Arc<NetworkInfoBridge<S::NetworkInfoHostType>>,
    pub sharing: Arc<SharingBridge<S::SharingHostType>>,
}

impl<S: BridgeSystem> Bridges<S> {
    pub fn new() -> Result<Self> {
        let system = S::new()?;
        let popup = system.new_popup_bridge()?;
        let network_info = system.new_network_info_bridge()?;
        let sharing = system.new_sharing_bridge()?;
        Ok(Self {
            system,
            popup,
            network_info,
            sharing,
        })
    }
}

pub type PlatformBridges = Bridges<PlatformBridgeSystem>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier, mpsc};
    use std::time::Duration;
    use unibridge_headless::HeadlessBridgeSystem;

    fn new_bridges() -> Bridges<HeadlessBridgeSystem> {
        Bridges::new().unwrap()
    }

    #[test]
    fn popup_dialog_lifecycle() {
        let bridges = new_bridges();
        let (tx, rx) = mpsc::channel();

        let outcome = bridges
            .popup
            .show(
                &PopupRequest {
                    title: "Title",
                    message: "Msg",
                    buttons: &["OK", "Cancel"],
                },
                move |index| tx.send(index).unwrap(),
            )
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);

        let pending = bridges.system.popup().pending().unwrap();
        assert_eq!(pending.title, "Title");
        assert_eq!(pending.message, "Msg");
        assert_eq!(pending.buttons, vec!["OK", "Cancel"]);

        // the user taps "Cancel" on the platform UI thread
        let ui = bridges.system.popup().clone();
        std::thread::spawn(move || {
            assert!(ui.dismiss(1));
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);

        // back to idle: a subsequent show succeeds
        let outcome = bridges
            .popup
            .show(
                &PopupRequest {
                    title: "Again",
                    message: "Msg",
                    buttons: &["OK"],
                },
                |_| {},
            )
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
    }

    #[test]
    fn show_while_a_dialog_is_up_is_dropped_silently() {
        let bridges = new_bridges();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        bridges
            .popup
            .show(
                &PopupRequest {
                    title: "First",
                    message: "Msg",
                    buttons: &["OK"],
                },
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
            )
            .unwrap();

        let counter = fired.clone();
        let outcome = bridges
            .popup
            .show(
                &PopupRequest {
                    title: "Second",
                    message: "Msg",
                    buttons: &["OK"],
                },
                move |_| {
                    counter.fetch_add(100, Ordering::SeqCst);
                },
            )
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Busy);
        // the first dialog is still the one on screen
        assert_eq!(
            bridges.system.popup().pending().unwrap().title,
            "First"
        );

        bridges.system.popup().dismiss(0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn racing_shows_accept_exactly_one() {
        let bridges = Arc::new(new_bridges());
        let accepted = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let bridges = bridges.clone();
                let accepted = accepted.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    let outcome = bridges
                        .popup
                        .show(
                            &PopupRequest {
                                title: "Race",
                                message: "Msg",
                                buttons: &["OK"],
                            },
                            |_| {},
                        )
                        .unwrap();
                    if outcome.is_accepted() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
        assert!(bridges.system.popup().is_showing());
    }

    #[test]
    fn share_with_empty_image_completes() {
        let bridges = new_bridges();
        let (tx, rx) = mpsc::channel();

        let outcome = bridges
            .sharing
            .share(
                &ShareRequest {
                    text: "Look at this!",
                    url: "https://example.com",
                    image: &[],
                },
                move |destination, completed| tx.send((destination, completed)).unwrap(),
            )
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(bridges.system.sharing().pending().unwrap().image.is_empty());

        bridges.system.sharing().finish("mail", true);
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            ("mail".to_string(), true)
        );
    }

    #[test]
    fn cancelled_share_returns_to_idle() {
        let bridges = new_bridges();
        let (tx, rx) = mpsc::channel();

        bridges
            .sharing
            .share(
                &ShareRequest {
                    text: "Look at this!",
                    url: "",
                    image: &[1, 2, 3],
                },
                move |destination, completed| tx.send((destination, completed)).unwrap(),
            )
            .unwrap();
        bridges.system.sharing().finish("", false);
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            (String::new(), false)
        );
        assert!(!bridges.sharing.is_showing().unwrap());
    }

    #[test]
    fn network_query_follows_change_notifications() {
        let bridges = new_bridges();
        let (tx, rx) = mpsc::channel();

        bridges.system.network().set_current_type(NetworkType::Edge.raw());
        assert_eq!(
            bridges.network_info.current_network_type().unwrap(),
            NetworkType::Edge
        );

        bridges
            .network_info
            .set_type_changed_handler(move |ty| tx.send(ty).unwrap());
        bridges.system.network().change_type(NetworkType::Lte.raw());

        let notified = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(notified, NetworkType::Lte);
        assert_eq!(
            bridges.network_info.current_network_type().unwrap(),
            notified
        );
        assert!(notified.is_fast());
    }

    #[test]
    fn cleanup_releases_the_platform_listener_but_keeps_queries_working() {
        let bridges = new_bridges();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        bridges
            .network_info
            .set_type_changed_handler(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        bridges.network_info.cleanup().unwrap();
        bridges.network_info.cleanup().unwrap();
        assert!(!bridges.system.network().is_listening());

        bridges.system.network().change_type(NetworkType::Hspa.raw());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(
            bridges.network_info.current_network_type().unwrap(),
            NetworkType::Hspa
        );
    }

    #[test]
    fn reinit_after_cleanup_restores_notifications() {
        let bridges = new_bridges();
        bridges.network_info.cleanup().unwrap();

        let network_info = bridges.system.new_network_info_bridge().unwrap();
        let (tx, rx) = mpsc::channel();
        network_info.set_type_changed_handler(move |ty| tx.send(ty).unwrap());

        bridges.system.network().change_type(NetworkType::Umts.raw());
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            NetworkType::Umts
        );
    }
}
