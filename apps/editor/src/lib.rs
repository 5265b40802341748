//! Resume editor core: the in-memory document model, identity allocation for
//! dynamically added entries, section-scoped AI enhancement with a local
//! fallback, and persistence/export.
//!
//! The entry point for callers is [`session::EditorSession`], which owns the
//! single document instance plus all ephemeral enhancement state. UI layers
//! are expected to sit on top of the session and never touch the lower
//! modules directly.

pub mod config;
pub mod document;
pub mod enhance;
pub mod identity;
pub mod persist;
pub mod session;
pub mod upload;
