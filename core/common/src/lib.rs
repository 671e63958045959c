//! Common types shared across Letterbox modules.
//!
//! This module provides the error type and the small set of domain types
//! (session ids, identities, delegated tokens) used by every other crate.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{DelegatedToken, Identity, SessionId};
