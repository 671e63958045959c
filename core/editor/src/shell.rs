//! Editor shell state machine.

use async_trait::async_trait;

use letterbox_common::{Identity, Result};

use crate::draft::DraftStore;

/// State of the save-to-remote control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// No save in flight; the control is enabled.
    Idle,
    /// A save is in flight; further clicks are ignored.
    Saving,
}

/// User-facing notices raised by shell actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Draft rewritten to the local slot.
    DraftSaved,
    /// Action refused because the document is blank.
    EmptyDocument,
    /// Remote save completed and the local slot was cleared.
    RemoteSaved,
    /// Remote save failed; content and slot are untouched.
    RemoteFailed(String),
}

/// The save endpoint as seen from the client.
#[async_trait]
pub trait RemoteSaver: Send + Sync {
    /// Send content to the server's save endpoint.
    async fn save(&self, content: &str) -> Result<()>;
}

/// The session API as seen from the client.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Fetch the signed-in identity for the session cookie.
    async fn current_user(&self) -> Result<Identity>;

    /// Invalidate the session on the server.
    async fn logout(&self) -> Result<()>;
}

/// Editor shell holding the in-memory content and driving the draft slot,
/// the signed-in identity and the remote save state machine.
pub struct EditorShell<D: DraftStore> {
    content: String,
    draft: D,
    identity: Option<Identity>,
    state: SaveState,
}

impl<D: DraftStore> EditorShell<D> {
    /// Create a shell over a draft store.
    pub fn new(draft: D) -> Self {
        Self {
            content: String::new(),
            draft,
            identity: None,
            state: SaveState::Idle,
        }
    }

    /// Hydrate initial content from the draft slot, if present.
    pub fn hydrate(&mut self) {
        if let Some(saved) = self.draft.load() {
            self.content = saved;
        }
    }

    /// Fetch the current identity from the Session API.
    ///
    /// Any failure renders signed-out: the identity is simply absent, no
    /// notice is raised.
    pub async fn fetch_identity(&mut self, api: &dyn SessionApi) {
        self.identity = api.current_user().await.ok();
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Sign out: call the Session API, then drop the local identity.
    ///
    /// Returns true when the host must force a full navigation to the
    /// signed-out entry point; a failed logout leaves the shell as it was.
    pub async fn logout(&mut self, api: &dyn SessionApi) -> bool {
        match api.logout().await {
            Ok(()) => {
                self.identity = None;
                true
            }
            Err(_) => false,
        }
    }

    /// Current in-memory content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current save state; hosts disable the control while `Saving`.
    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Update content, mirroring it into the draft slot (write-through).
    /// Blank content removes the slot's entry instead.
    pub fn set_content(&mut self, value: impl Into<String>) {
        self.content = value.into();
        if self.content.trim().is_empty() {
            self.draft.clear();
        } else {
            self.draft.store(&self.content);
        }
    }

    /// Rewrite the draft slot. Blank content is refused with a notice and
    /// never reaches the server.
    pub fn save_draft(&self) -> Notice {
        if self.content.trim().is_empty() {
            return Notice::EmptyDocument;
        }
        self.draft.store(&self.content);
        Notice::DraftSaved
    }

    /// Wipe in-memory content and the draft slot.
    pub fn clear(&mut self) {
        self.content.clear();
        self.draft.clear();
    }

    /// Transition into `Saving` if idle. Returns false when a save is
    /// already in flight, in which case the caller must ignore the action.
    fn begin_save(&mut self) -> bool {
        if self.state == SaveState::Saving {
            return false;
        }
        self.state = SaveState::Saving;
        true
    }

    /// Save content to the remote endpoint.
    ///
    /// State machine: `Idle → Saving → Idle` on both success and failure.
    /// Returns `None` when a save is already in flight (the click is
    /// ignored). On success the draft slot is cleared; on failure content
    /// and slot are left untouched.
    pub async fn save_to_remote(&mut self, saver: &dyn RemoteSaver) -> Option<Notice> {
        if self.content.trim().is_empty() {
            return Some(Notice::EmptyDocument);
        }
        if !self.begin_save() {
            return None;
        }

        let outcome = saver.save(&self.content).await;
        self.state = SaveState::Idle;

        match outcome {
            Ok(()) => {
                self.draft.clear();
                Some(Notice::RemoteSaved)
            }
            Err(e) => Some(Notice::RemoteFailed(e.to_string())),
        }
    }
}
