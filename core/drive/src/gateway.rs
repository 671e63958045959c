//! Storage gateway: the two-step remote write.

use chrono::Utc;
use std::sync::Arc;

use letterbox_common::{Error, Result};
use letterbox_session::Session;

use crate::client::DriveApi;
use crate::document::{letter_name, wrap_html, FOLDER_NAME};

/// Gateway performing the folder-ensure and upload steps against the
/// upstream file API on behalf of a session.
///
/// The session is passed explicitly into each call rather than read from
/// ambient request state, so the gateway can be exercised in isolation.
pub struct StorageGateway {
    api: Arc<dyn DriveApi>,
}

impl StorageGateway {
    /// Create a gateway over a Drive API implementation.
    pub fn new(api: Arc<dyn DriveApi>) -> Self {
        Self { api }
    }

    /// Save editor content as a new document in the user's "Letters" folder.
    ///
    /// Sequence: list folders by name, create the folder if the listing is
    /// empty (first match wins otherwise, duplicates are never merged), wrap
    /// the content as HTML, then issue a single multipart create-with-upload.
    /// The provider's response body is returned verbatim.
    ///
    /// Empty content is accepted here; rejecting it is the caller's concern.
    ///
    /// # Errors
    /// - `Unauthenticated` if the session carries an empty token; no
    ///   upstream call is made in that case
    /// - `Upstream`/`Network` on any failure at the remaining steps; the
    ///   whole operation aborts and a folder created along the way is kept
    pub async fn save_letter(
        &self,
        session: &Session,
        content: &str,
    ) -> Result<serde_json::Value> {
        if session.token.is_empty() {
            return Err(Error::Unauthenticated(
                "Session has no delegated token".to_string(),
            ));
        }

        let token = &session.token;

        let folders = self.api.find_folders(token, FOLDER_NAME).await?;
        let folder_id = match folders.first() {
            Some(folder) => folder.id.clone(),
            None => {
                tracing::info!(folder = FOLDER_NAME, "Creating destination folder");
                self.api.create_folder(token, FOLDER_NAME).await?.id
            }
        };

        let html = wrap_html(content);
        let name = letter_name(Utc::now());

        tracing::info!(%name, "Uploading document");
        self.api
            .upload_document(token, &name, &folder_id, &html)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use letterbox_common::{DelegatedToken, Identity};

    use crate::client::DriveFile;

    /// What the mock upstream observed, in order.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        FindFolders { name: String },
        CreateFolder { name: String },
        Upload { name: String, folder_id: String, html: String },
    }

    /// Recording in-memory Drive API.
    struct RecordingDrive {
        calls: Mutex<Vec<Call>>,
        existing_folders: Vec<DriveFile>,
        fail_upload: bool,
    }

    impl RecordingDrive {
        fn new(existing_folders: Vec<DriveFile>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                existing_folders,
                fail_upload: false,
            }
        }

        fn failing_upload() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                existing_folders: Vec::new(),
                fail_upload: true,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DriveApi for RecordingDrive {
        async fn find_folders(
            &self,
            _token: &DelegatedToken,
            name: &str,
        ) -> Result<Vec<DriveFile>> {
            self.calls.lock().unwrap().push(Call::FindFolders {
                name: name.to_string(),
            });
            Ok(self.existing_folders.clone())
        }

        async fn create_folder(&self, _token: &DelegatedToken, name: &str) -> Result<DriveFile> {
            self.calls.lock().unwrap().push(Call::CreateFolder {
                name: name.to_string(),
            });
            Ok(DriveFile {
                id: "created-folder-id".to_string(),
                name: name.to_string(),
            })
        }

        async fn upload_document(
            &self,
            _token: &DelegatedToken,
            name: &str,
            folder_id: &str,
            html: &str,
        ) -> Result<serde_json::Value> {
            self.calls.lock().unwrap().push(Call::Upload {
                name: name.to_string(),
                folder_id: folder_id.to_string(),
                html: html.to_string(),
            });
            if self.fail_upload {
                return Err(Error::Upstream {
                    status: 403,
                    message: "insufficient scope".to_string(),
                });
            }
            Ok(serde_json::json!({ "id": "file-id", "name": name }))
        }
    }

    fn session_with_token(token: &str) -> Session {
        Session::new(
            Identity {
                display_name: "Test User".to_string(),
                emails: vec!["test@example.com".to_string()],
                subject: "subject-1".to_string(),
            },
            DelegatedToken::new(token),
        )
    }

    #[tokio::test]
    async fn test_empty_token_makes_no_upstream_call() {
        let api = Arc::new(RecordingDrive::new(Vec::new()));
        let gateway = StorageGateway::new(api.clone());

        let result = gateway
            .save_letter(&session_with_token(""), "content")
            .await;

        assert!(matches!(result, Err(Error::Unauthenticated(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_folder_is_created_before_upload() {
        let api = Arc::new(RecordingDrive::new(Vec::new()));
        let gateway = StorageGateway::new(api.clone());

        gateway
            .save_letter(&session_with_token("T"), "hello")
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            Call::FindFolders {
                name: "Letters".to_string()
            }
        );
        assert_eq!(
            calls[1],
            Call::CreateFolder {
                name: "Letters".to_string()
            }
        );
        match &calls[2] {
            Call::Upload { folder_id, .. } => assert_eq!(folder_id, "created-folder-id"),
            other => panic!("expected upload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_existing_folder_skips_create() {
        let api = Arc::new(RecordingDrive::new(vec![
            DriveFile {
                id: "first-id".to_string(),
                name: "Letters".to_string(),
            },
            DriveFile {
                id: "duplicate-id".to_string(),
                name: "Letters".to_string(),
            },
        ]));
        let gateway = StorageGateway::new(api.clone());

        gateway
            .save_letter(&session_with_token("T"), "hello")
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        // First match wins; the duplicate folder is left alone.
        match &calls[1] {
            Call::Upload { folder_id, .. } => assert_eq!(folder_id, "first-id"),
            other => panic!("expected upload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_saves_get_distinct_names() {
        let api = Arc::new(RecordingDrive::new(vec![DriveFile {
            id: "folder-id".to_string(),
            name: "Letters".to_string(),
        }]));
        let gateway = StorageGateway::new(api.clone());
        let session = session_with_token("T");

        gateway.save_letter(&session, "same content").await.unwrap();
        // Names are millisecond-derived; make sure the clock moves.
        std::thread::sleep(std::time::Duration::from_millis(2));
        gateway.save_letter(&session, "same content").await.unwrap();

        let names: Vec<String> = api
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { name, .. } => Some(name),
                _ => None,
            })
            .collect();

        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
        assert!(names.iter().all(|n| n.starts_with("Letter_")));
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_upstream_error() {
        let api = Arc::new(RecordingDrive::failing_upload());
        let gateway = StorageGateway::new(api.clone());

        let result = gateway.save_letter(&session_with_token("T"), "hello").await;

        match result {
            Err(Error::Upstream { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "insufficient scope");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        // The folder created before the failing upload is kept; no rollback.
        let calls = api.calls();
        assert!(calls.contains(&Call::CreateFolder {
            name: "Letters".to_string()
        }));
    }

    #[tokio::test]
    async fn test_end_to_end_save_sequence() {
        let api = Arc::new(RecordingDrive::new(Vec::new()));
        let gateway = StorageGateway::new(api.clone());

        let response = gateway
            .save_letter(&session_with_token("T"), "Hello\nWorld")
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(
            calls[0],
            Call::FindFolders {
                name: "Letters".to_string()
            }
        );
        assert_eq!(
            calls[1],
            Call::CreateFolder {
                name: "Letters".to_string()
            }
        );
        match &calls[2] {
            Call::Upload {
                name,
                folder_id,
                html,
            } => {
                assert!(name.starts_with("Letter_"));
                assert_eq!(folder_id, "created-folder-id");
                assert!(html.contains("Hello<br>World"));
            }
            other => panic!("expected upload, got {:?}", other),
        }

        // Provider response is relayed verbatim.
        assert_eq!(response["id"], "file-id");
    }

    #[tokio::test]
    async fn test_empty_content_is_accepted_by_gateway() {
        // Rejecting empty content is the caller's concern.
        let api = Arc::new(RecordingDrive::new(Vec::new()));
        let gateway = StorageGateway::new(api.clone());

        let result = gateway.save_letter(&session_with_token("T"), "").await;
        assert!(result.is_ok());
    }
}
