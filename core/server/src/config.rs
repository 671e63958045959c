//! Server runtime configuration.

use std::env;

use letterbox_common::{Error, Result};
use letterbox_drive::AuthConfig;

/// Runtime configuration, read from the environment.
///
/// Only the OAuth client id and secret are required; everything else has a
/// local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// OAuth client id (`GOOGLE_CLIENT_ID`).
    pub client_id: String,
    /// OAuth client secret (`GOOGLE_CLIENT_SECRET`).
    pub client_secret: String,
    /// OAuth callback URL (`OAUTH_REDIRECT_URL`).
    pub redirect_url: String,
    /// Where the browser lands after a successful sign-in (`EDITOR_URL`).
    pub editor_url: String,
    /// Where the browser lands after a failed sign-in (`LOGIN_URL`).
    pub login_url: String,
    /// CORS origin allow-list (`ALLOWED_ORIGINS`, comma-separated).
    pub allowed_origins: Vec<String>,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Mark the session cookie `Secure` (`COOKIE_SECURE`); off for local
    /// development.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// # Errors
    /// - `GOOGLE_CLIENT_ID` or `GOOGLE_CLIENT_SECRET` not set
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| Error::InvalidInput("GOOGLE_CLIENT_ID is not set".to_string()))?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET")
            .map_err(|_| Error::InvalidInput("GOOGLE_CLIENT_SECRET is not set".to_string()))?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_url: env_or(
                "OAUTH_REDIRECT_URL",
                "http://localhost:5000/auth/google/callback",
            ),
            editor_url: env_or("EDITOR_URL", "http://localhost:3000/editor"),
            login_url: env_or("LOGIN_URL", "http://localhost:3000/"),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// OAuth configuration slice for the identity broker.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_url: self.redirect_url.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:3000, https://letters.example.com ,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://letters.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_auth_config_slice() {
        let config = ServerConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost:5000/auth/google/callback".to_string(),
            editor_url: "http://localhost:3000/editor".to_string(),
            login_url: "http://localhost:3000/".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            port: 5000,
            cookie_secure: false,
        };

        let auth = config.auth_config();
        assert_eq!(auth.client_id, "id");
        assert_eq!(auth.redirect_url, config.redirect_url);
    }
}
