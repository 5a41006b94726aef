use std::sync::{Arc, Mutex};

use unibridge_common::{PopupHost, PopupRequest, Result};

use crate::lock;

type DismissSink = Box<dyn Fn(i32) + Send + Sync>;

/// Snapshot of the dialog currently "on screen".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingPopup {
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
}

#[derive(Default)]
struct PopupShared {
    pending: Mutex<Option<PendingPopup>>,
    dismiss_sink: Mutex<Option<DismissSink>>,
}

/// Driver handle for the in-memory popup UI.
#[derive(Clone)]
pub struct HeadlessPopup {
    shared: Arc<PopupShared>,
}

impl HeadlessPopup {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(PopupShared::default()),
        }
    }

    pub(crate) fn host(&self) -> HeadlessPopupHost {
        HeadlessPopupHost {
            shared: self.shared.clone(),
        }
    }

    pub(crate) fn set_dismiss_sink(&self, sink: impl Fn(i32) + Send + Sync + 'static) {
        *lock(&self.shared.dismiss_sink) = Some(Box::new(sink));
    }

    pub fn is_showing(&self) -> bool {
        lock(&self.shared.pending).is_some()
    }

    pub fn pending(&self) -> Option<PendingPopup> {
        lock(&self.shared.pending).clone()
    }

    /// Resolves the pending dialog the way the platform UI would: clears
    /// the showing state first, then delivers the dismissal. Returns false
    /// when no dialog is on screen.
    pub fn dismiss(&self, button_index: i32) -> bool {
        if lock(&self.shared.pending).take().is_none() {
            return false;
        }
        if let Some(sink) = &*lock(&self.shared.dismiss_sink) {
            sink(button_index);
        }
        true
    }
}

pub struct HeadlessPopupHost {
    shared: Arc<PopupShared>,
}

impl PopupHost for HeadlessPopupHost {
    fn is_showing(&self) -> Result<bool> {
        Ok(lock(&self.shared.pending).is_some())
    }

    fn show(&self, request: &PopupRequest<'_>) -> Result<()> {
        *lock(&self.shared.pending) = Some(PendingPopup {
            title: request.title.to_string(),
            message: request.message.to_string(),
            buttons: request.buttons.iter().map(|b| b.to_string()).collect(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_without_a_dialog_reports_false() {
        let popup = HeadlessPopup::new();
        assert!(!popup.dismiss(0));
    }

    #[test]
    fn show_records_the_request_for_inspection() {
        let popup = HeadlessPopup::new();
        let host = popup.host();
        host.show(&PopupRequest {
            title: "Rate us",
            message: "Enjoying the game?",
            buttons: &["Sure", "Later"],
        })
        .unwrap();
        let pending = popup.pending().unwrap();
        assert_eq!(pending.title, "Rate us");
        assert_eq!(pending.buttons, vec!["Sure", "Later"]);
        assert!(popup.is_showing());
    }
}
