//! The server-side session record.

use chrono::{DateTime, Utc};

use letterbox_common::{DelegatedToken, Identity, SessionId};

/// Server-side record binding a cookie identifier to an identity and the
/// delegated access token.
///
/// Created on a successful OAuth callback, read on every authenticated
/// request, destroyed on logout. The token never leaves this record except
/// as an Authorization header on upstream calls.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier, mirrored into the session cookie.
    pub id: SessionId,
    /// Provider identity fetched at sign-in.
    pub identity: Identity,
    /// Delegated bearer token for the user's storage.
    pub token: DelegatedToken,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Establish a new session for an identity and its delegated token.
    pub fn new(identity: Identity, token: DelegatedToken) -> Self {
        Self {
            id: SessionId::new(),
            identity,
            token,
            created_at: Utc::now(),
        }
    }
}
