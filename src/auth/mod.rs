//! Authentication module
//!
//! Supports: static bearer tokens, file-backed tokens persisted across runs
//!
//! An `AuthProvider` supplies the credential used by the HTTP executor and
//! can be told to invalidate it once the server rejects it. The paginator
//! itself never touches credentials; it only reports unauthorized failures.

mod provider;
mod types;

pub use provider::{AuthProvider, StaticToken, TokenFile};
pub use types::{CachedToken, StoredToken};
