//! Shared application state.

use std::sync::Arc;

use letterbox_common::Result;
use letterbox_drive::{AuthManager, DriveApi, DriveClient, StorageGateway};
use letterbox_session::{MemorySessionStore, SessionStore};

use crate::config::ServerConfig;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: Arc<ServerConfig>,
    /// OAuth2 identity broker.
    pub auth: Arc<AuthManager>,
    /// Session store (session id → record).
    pub sessions: Arc<dyn SessionStore>,
    /// Storage gateway over the upstream file API.
    pub gateway: Arc<StorageGateway>,
    /// HTTP client for the sign-in profile fetch.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state against the real upstream provider with an in-memory
    /// session store.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let auth = Arc::new(AuthManager::new(config.auth_config())?);
        let drive: Arc<dyn DriveApi> = Arc::new(DriveClient::new()?);
        Ok(Self::with_parts(
            config,
            auth,
            Arc::new(MemorySessionStore::new()),
            drive,
        ))
    }

    /// Build state from explicit parts. Tests use this to inject a mock
    /// Drive API or a failing session store.
    pub fn with_parts(
        config: ServerConfig,
        auth: Arc<AuthManager>,
        sessions: Arc<dyn SessionStore>,
        drive: Arc<dyn DriveApi>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            sessions,
            gateway: Arc::new(StorageGateway::new(drive)),
            http: reqwest::Client::new(),
        }
    }
}
