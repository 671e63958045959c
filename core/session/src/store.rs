//! Session store trait definition.

use async_trait::async_trait;

use letterbox_common::{Result, SessionId};

use crate::record::Session;

/// Keyed session store (session id → record).
///
/// Each request reads or writes exactly its own session entry; no
/// cross-session coordination is required of implementations.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session, keyed by its id.
    ///
    /// # Errors
    /// - Backing store write failure
    async fn insert(&self, session: Session) -> Result<()>;

    /// Look up a session by id. Returns `None` for an unknown id.
    async fn get(&self, id: &SessionId) -> Result<Option<Session>>;

    /// Destroy a session.
    ///
    /// Removing an id that is already absent is not an error; logout is
    /// best-effort and idempotent from the client's perspective.
    ///
    /// # Errors
    /// - Backing store destroy failure
    async fn remove(&self, id: &SessionId) -> Result<()>;
}
