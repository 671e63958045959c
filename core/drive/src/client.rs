//! Google Drive API client.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use letterbox_common::{DelegatedToken, Error, Result};

/// Google Drive API base URL.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
/// Google Drive upload API base URL.
const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// MIME type identifying Drive folders.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
/// MIME type for the provider's native document format.
pub const DOCUMENT_MIME: &str = "application/vnd.google-apps.document";

/// Multipart boundary for create-with-upload requests.
const UPLOAD_BOUNDARY: &str = "LetterboxBoundary";

/// Drive file metadata, as returned by listing and folder-create calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Provider-assigned file id.
    pub id: String,
    /// File name.
    pub name: String,
}

/// Response from listing files.
#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Upstream Drive API surface used by the storage gateway.
///
/// The delegated token is passed per call; the gateway owns no credential
/// state of its own.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// List folders matching a name, owned by the authenticated identity.
    async fn find_folders(&self, token: &DelegatedToken, name: &str) -> Result<Vec<DriveFile>>;

    /// Create a folder at the Drive root.
    async fn create_folder(&self, token: &DelegatedToken, name: &str) -> Result<DriveFile>;

    /// Multipart create-with-upload of an HTML document, converted to the
    /// provider's native document format under the given parent folder.
    /// Returns the provider's response body verbatim.
    async fn upload_document(
        &self,
        token: &DelegatedToken,
        name: &str,
        folder_id: &str,
        html: &str,
    ) -> Result<serde_json::Value>;
}

/// HTTP implementation of the Drive API.
pub struct DriveClient {
    http: Client,
}

impl DriveClient {
    /// Create a new Drive client.
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent("Letterbox/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Handle an API response, collapsing any non-2xx into `Upstream`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| Error::Upstream {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Upstream {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

/// Build a `multipart/related` body: a JSON metadata part followed by a
/// `text/html` content part.
pub(crate) fn multipart_related(boundary: &str, metadata_json: &str, html: &str) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata_json.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: text/html\r\n\r\n");
    body.extend_from_slice(html.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--", boundary).as_bytes());

    body
}

#[async_trait]
impl DriveApi for DriveClient {
    async fn find_folders(&self, token: &DelegatedToken, name: &str) -> Result<Vec<DriveFile>> {
        let url = format!("{}/files", DRIVE_API_BASE);
        let query = format!("name='{}' and mimeType='{}'", name, FOLDER_MIME);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to list folders: {}", e)))?;

        let list: FileListResponse = self.handle_response(response).await?;
        Ok(list.files)
    }

    async fn create_folder(&self, token: &DelegatedToken, name: &str) -> Result<DriveFile> {
        let url = format!("{}/files", DRIVE_API_BASE);
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&metadata)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to create folder: {}", e)))?;

        self.handle_response(response).await
    }

    async fn upload_document(
        &self,
        token: &DelegatedToken,
        name: &str,
        folder_id: &str,
        html: &str,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/files?uploadType=multipart", DRIVE_UPLOAD_BASE);

        let metadata = serde_json::json!({
            "name": name,
            "mimeType": DOCUMENT_MIME,
            "parents": [folder_id],
        });
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| Error::Serialization(format!("Failed to serialize metadata: {}", e)))?;

        let body = multipart_related(UPLOAD_BOUNDARY, &metadata_json, html);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", UPLOAD_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to upload document: {}", e)))?;

        self.handle_response(response).await
    }
}
