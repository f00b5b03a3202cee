use crate::models::upload_types::SelectedFile;
use base64::Engine;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Hands out preview handles and counts the ones still holding their bytes.
#[derive(Clone, Default)]
pub struct PreviewTracker {
    live: Arc<AtomicUsize>,
    next_id: Arc<AtomicU64>,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, file: &SelectedFile) -> PreviewHandle {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(id, file = %file.file_name, "preview acquired");

        PreviewHandle {
            id,
            url: Some(format!("data:{};base64,{}", file.mime_type, encoded)),
            live: self.live.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A revocable reference to the selected file's bytes, rendered as a `data:` URL.
///
/// Released at most once: explicitly through [`PreviewHandle::release`] or
/// implicitly on drop. Releasing an already released handle does nothing.
pub struct PreviewHandle {
    id: u64,
    url: Option<String>,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.url.is_some()
    }

    /// Returns whether this call did the release.
    pub fn release(&mut self) -> bool {
        if self.url.take().is_none() {
            return false;
        }
        self.live.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!(id = self.id, "preview released");
        true
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}
