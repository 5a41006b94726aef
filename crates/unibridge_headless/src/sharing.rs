use std::sync::{Arc, Mutex};

use unibridge_common::{Result, ShareRequest, SharingHost};

use crate::lock;

type FinishSink = Box<dyn Fn(String, bool) + Send + Sync>;

/// Snapshot of the share sheet currently "open".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingShare {
    pub text: String,
    pub url: String,
    pub image: Vec<u8>,
}

#[derive(Default)]
struct SharingShared {
    pending: Mutex<Option<PendingShare>>,
    finish_sink: Mutex<Option<FinishSink>>,
}

/// Driver handle for the in-memory share sheet.
#[derive(Clone)]
pub struct HeadlessSharing {
    shared: Arc<SharingShared>,
}

impl HeadlessSharing {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(SharingShared::default()),
        }
    }

    pub(crate) fn host(&self) -> HeadlessSharingHost {
        HeadlessSharingHost {
            shared: self.shared.clone(),
        }
    }

    pub(crate) fn set_finish_sink(
        &self,
        sink: impl Fn(String, bool) + Send + Sync + 'static,
    ) {
        *lock(&self.shared.finish_sink) = Some(Box::new(sink));
    }

    pub fn is_showing(&self) -> bool {
        lock(&self.shared.pending).is_some()
    }

    pub fn pending(&self) -> Option<PendingShare> {
        lock(&self.shared.pending).clone()
    }

    /// Closes the pending share sheet: clears the showing state, then
    /// delivers the completion. An empty destination with `completed ==
    /// false` models the user cancelling. Returns false when no sheet is
    /// open.
    pub fn finish(&self, destination: impl Into<String>, completed: bool) -> bool {
        if lock(&self.shared.pending).take().is_none() {
            return false;
        }
        if let Some(sink) = &*lock(&self.shared.finish_sink) {
            sink(destination.into(), completed);
        }
        true
    }
}

pub struct HeadlessSharingHost {
    shared: Arc<SharingShared>,
}

impl SharingHost for HeadlessSharingHost {
    fn is_showing(&self) -> Result<bool> {
        Ok(lock(&self.shared.pending).is_some())
    }

    fn share(&self, request: &ShareRequest<'_>) -> Result<()> {
        *lock(&self.shared.pending) = Some(PendingShare {
            text: request.text.to_string(),
            url: request.url.to_string(),
            image: request.image.to_vec(),
        });
        Ok(())
    }
}
