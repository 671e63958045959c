//! OAuth2 authorization-code flow and identity fetch.

use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};

use letterbox_common::{DelegatedToken, Error, Identity, Result};

/// OAuth2 authorization endpoint.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// OAuth2 token endpoint.
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Userinfo endpoint for the signed-in profile.
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested at the consent screen: profile, email, and file-scoped
/// Drive access.
const SCOPES: [&str; 3] = [
    "profile",
    "email",
    "https://www.googleapis.com/auth/drive.file",
];

/// Configuration for the OAuth2 flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Client ID registered with the provider.
    pub client_id: String,
    /// Client secret registered with the provider.
    pub client_secret: String,
    /// Redirect URL for the OAuth2 callback.
    pub redirect_url: String,
}

/// OAuth2 manager driving the authorization-code exchange.
pub struct AuthManager {
    client: BasicClient,
    config: AuthConfig,
}

impl AuthManager {
    /// Create a new authentication manager.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                .map_err(|e| Error::InvalidInput(format!("Invalid auth URL: {}", e)))?,
            Some(
                TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
                    .map_err(|e| Error::InvalidInput(format!("Invalid token URL: {}", e)))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(config.redirect_url.clone())
                .map_err(|e| Error::InvalidInput(format!("Invalid redirect URL: {}", e)))?,
        );

        Ok(Self { client, config })
    }

    /// Generate the consent-screen URL for the browser to visit.
    ///
    /// Returns the URL and the CSRF state token carried through the redirect.
    pub fn authorization_url(&self) -> (String, String) {
        let mut request = self.client.authorize_url(CsrfToken::new_random);
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (auth_url, csrf_token) = request.url();

        (auth_url.to_string(), csrf_token.secret().clone())
    }

    /// Exchange an authorization code for a delegated access token.
    ///
    /// A single attempt; any upstream failure aborts the sign-in flow.
    ///
    /// # Errors
    /// - Invalid or expired authorization code
    /// - Network errors
    pub async fn exchange_code(&self, code: &str) -> Result<DelegatedToken> {
        use oauth2::reqwest::async_http_client;

        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| Error::ProviderAuth(format!("Token exchange failed: {}", e)))?;

        Ok(DelegatedToken::new(
            token_result.access_token().secret().clone(),
        ))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Shape of the provider's userinfo response. Only the fields the editor
/// needs are deserialized.
#[derive(Debug, Deserialize)]
struct UserinfoResponse {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Fetch the signed-in user's profile with the delegated token.
///
/// Part of the sign-in flow; failures surface as `ProviderAuth` and return
/// the user to the login view.
pub async fn fetch_identity(http: &reqwest::Client, token: &DelegatedToken) -> Result<Identity> {
    let response = http
        .get(USERINFO_URL)
        .bearer_auth(token.as_str())
        .send()
        .await
        .map_err(|e| Error::ProviderAuth(format!("Profile fetch failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(Error::ProviderAuth(format!(
            "Profile fetch returned {}",
            status
        )));
    }

    let info: UserinfoResponse = response
        .json()
        .await
        .map_err(|e| Error::ProviderAuth(format!("Invalid profile response: {}", e)))?;

    Ok(Identity {
        display_name: info.name.unwrap_or_default(),
        emails: info.email.into_iter().collect(),
        subject: info.id,
    })
}
