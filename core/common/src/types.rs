//! Domain types used throughout Letterbox.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a server-side session.
///
/// Generated as a UUIDv4 when a session is established, and carried back to
/// the server in the session cookie on subsequent requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new unique session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reconstruct a session id from its cookie representation.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provider-issued identity for a signed-in user.
///
/// Immutable once fetched from the provider's userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Display name shown in the editor header.
    pub display_name: String,
    /// One or more email addresses on the account.
    pub emails: Vec<String>,
    /// Provider-assigned subject id.
    #[serde(rename = "id")]
    pub subject: String,
}

/// Opaque bearer credential delegated by the identity provider.
///
/// Scoped to file-create capability on the user's storage. Owned exclusively
/// by the server-side session; this type deliberately does not implement
/// `Serialize`, so it cannot end up in a client-bound response body.
#[derive(Clone, PartialEq, Eq)]
pub struct DelegatedToken(String);

impl DelegatedToken {
    /// Wrap a bearer string received from the token endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the bearer string for an upstream Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty (no delegated capability).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DelegatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret, even in debug logs.
        write!(f, "DelegatedToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_uniqueness() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_cookie_roundtrip() {
        let id = SessionId::new();
        let restored = SessionId::from_string(id.as_str());
        assert_eq!(id, restored);
    }

    #[test]
    fn test_identity_wire_shape() {
        let identity = Identity {
            display_name: "Ada Lovelace".to_string(),
            emails: vec!["ada@example.com".to_string()],
            subject: "1234567890".to_string(),
        };

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["displayName"], "Ada Lovelace");
        assert_eq!(json["id"], "1234567890");
        assert_eq!(json["emails"][0], "ada@example.com");
    }

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = DelegatedToken::new("ya29.secret-value");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-value"));
    }

    #[test]
    fn test_empty_token() {
        assert!(DelegatedToken::new("").is_empty());
        assert!(!DelegatedToken::new("T").is_empty());
    }
}
