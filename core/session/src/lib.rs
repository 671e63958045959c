//! Session management for Letterbox.
//!
//! A session binds a browser's cookie identifier to a provider identity and
//! the delegated access token. The store is a keyed abstraction so any
//! backing (in-memory, networked key-value) satisfies it; the server ships
//! with the in-memory store.

pub mod memory;
pub mod record;
pub mod store;

pub use memory::MemorySessionStore;
pub use record::Session;
pub use store::SessionStore;
