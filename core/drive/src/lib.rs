//! Google identity and Drive integration for Letterbox.
//!
//! This crate holds the two server-side pieces that talk to the upstream
//! provider:
//! - the identity broker (OAuth2 authorization-code exchange plus userinfo
//!   fetch), and
//! - the storage gateway (folder ensure followed by a multipart
//!   create-with-upload of the wrapped document).
//!
//! The Drive API surface is a trait so the gateway can be exercised against
//! a recording in-memory implementation in tests.

pub mod auth;
pub mod client;
pub mod document;
pub mod gateway;

pub use auth::{fetch_identity, AuthConfig, AuthManager};
pub use client::{DriveApi, DriveClient, DriveFile};
pub use document::{letter_name, wrap_html, FOLDER_NAME};
pub use gateway::StorageGateway;
