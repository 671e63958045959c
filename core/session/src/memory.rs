//! In-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use letterbox_common::{Result, SessionId};

use crate::record::Session;
use crate::store::SessionStore;

/// In-memory session store.
///
/// Sessions are lost on process restart, which matches the design: a session
/// is only valid while its delegated token is, and upstream calls fail when
/// the token goes stale anyway.
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl MemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterbox_common::{DelegatedToken, Identity};

    fn test_session() -> Session {
        Session::new(
            Identity {
                display_name: "Test User".to_string(),
                emails: vec!["test@example.com".to_string()],
                subject: "subject-1".to_string(),
            },
            DelegatedToken::new("T"),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemorySessionStore::new();
        let session = test_session();
        let id = session.id.clone();

        store.insert(session).await.unwrap();

        let found = store.get(&id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.token.as_str(), "T");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = MemorySessionStore::new();
        let found = store.get(&SessionId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_remove_destroys_session() {
        let store = MemorySessionStore::new();
        let session = test_session();
        let id = session.id.clone();

        store.insert(session).await.unwrap();
        store.remove(&id).await.unwrap();

        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_absent_is_ok() {
        let store = MemorySessionStore::new();
        // Best-effort logout: removing twice is safe.
        let id = SessionId::new();
        store.remove(&id).await.unwrap();
        store.remove(&id).await.unwrap();
    }
}
