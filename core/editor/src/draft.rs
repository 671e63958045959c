//! Draft slot abstraction.

use std::sync::Mutex;

/// Fixed key for the browser-local draft slot.
pub const DRAFT_KEY: &str = "draftContent";

/// Browser-local persistent slot holding the unsaved draft.
///
/// Single-tab, single-writer in practice; operations are infallible the way
/// web local storage is treated by callers.
pub trait DraftStore: Send + Sync {
    /// Read the stored draft, if any.
    fn load(&self) -> Option<String>;

    /// Overwrite the slot with the given content.
    fn store(&self, content: &str);

    /// Remove the slot's entry.
    fn clear(&self);
}

/// In-memory draft store for tests and non-browser hosts.
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    /// Create an empty draft store.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Create a store pre-populated with a draft.
    pub fn with_draft(content: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(content.into())),
        }
    }
}

impl Default for MemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn store(&self, content: &str) {
        *self.slot.lock().unwrap() = Some(content.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}
