//! Auth provider implementations
//!
//! Supplies bearer tokens and discards them when the server rejects them.

use super::types::{CachedToken, StoredToken};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Source of the credential attached to every report request
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get the current token
    async fn token(&self) -> Result<String>;

    /// Discard the current token; later `token` calls fail until a new one
    /// is supplied
    async fn invalidate(&self) -> Result<()>;
}

#[async_trait]
impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    async fn token(&self) -> Result<String> {
        (**self).token().await
    }

    async fn invalidate(&self) -> Result<()> {
        (**self).invalidate().await
    }
}

// ============================================================================
// Static Token
// ============================================================================

/// A fixed bearer token held in memory
#[derive(Debug, Default)]
pub struct StaticToken {
    token: RwLock<Option<String>>,
}

impl StaticToken {
    /// Create a provider for the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::auth("Token has been invalidated"))
    }

    async fn invalidate(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

// ============================================================================
// Token File
// ============================================================================

/// A token persisted as JSON on disk and reused across runs
#[derive(Debug)]
pub struct TokenFile {
    /// Path to the token file
    path: PathBuf,
    /// Token loaded from disk (cached)
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenFile {
    /// Create a provider backed by the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Path to the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a new token, replacing any previous one
    pub async fn store(&self, token: CachedToken) -> Result<()> {
        let contents = serde_json::to_string_pretty(&StoredToken::from(&token))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::auth(format!("Failed to write token file: {e}")))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::auth(format!("Failed to rename token file: {e}")))?;

        *self.cached_token.write().await = Some(token);
        debug!("Stored token in {}", self.path.display());
        Ok(())
    }

    /// Read the token from disk
    async fn load(&self) -> Result<CachedToken> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::auth(format!(
                    "No token file found at {}",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(Error::auth(format!("Failed to read token file: {e}")));
            }
        };

        let stored: StoredToken = serde_json::from_str(&contents)
            .map_err(|e| Error::auth(format!("Failed to parse token file: {e}")))?;
        Ok(stored.into())
    }
}

#[async_trait]
impl AuthProvider for TokenFile {
    async fn token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;
        let token = self.load().await?;
        if token.is_expired() {
            return Err(Error::auth(format!(
                "Token in {} has expired",
                self.path.display()
            )));
        }

        let token_str = token.token.clone();
        *cached = Some(token);
        Ok(token_str)
    }

    async fn invalidate(&self) -> Result<()> {
        let mut cached = self.cached_token.write().await;
        *cached = None;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Deleted token file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::auth(format!("Failed to delete token file: {e}"))),
        }
    }
}
