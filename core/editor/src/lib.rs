//! Client editor shell for Letterbox.
//!
//! Host-independent editing-shell logic: the rich-text widget, routing and
//! rendering stay with the host. The shell owns the in-memory content, the
//! write-through draft slot, the signed-in identity and the save-to-remote
//! state machine. IO seams (the browser-local slot, the save endpoint, the
//! session API) are traits the host adapts.

pub mod draft;
pub mod shell;

pub use draft::{DraftStore, MemoryDraftStore, DRAFT_KEY};
pub use shell::{EditorShell, Notice, RemoteSaver, SaveState, SessionApi};
