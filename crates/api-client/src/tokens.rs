//! Persisted credentials
//!
//! The access token is attached to every request; the refresh token is only
//! handed back to the backend at logout. Both live under fixed keys so they
//! survive process restarts when a file-backed store is used.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Token pair as persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    /// Short-lived bearer credential
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Longer-lived renewal credential
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Durable storage for the credential pair
pub trait TokenStore: Send + Sync {
    /// Read the current tokens
    fn load(&self) -> ApiResult<Tokens>;

    /// Replace the stored tokens
    fn save(&self, tokens: &Tokens) -> ApiResult<()>;

    /// Remove both tokens
    fn clear(&self) -> ApiResult<()> {
        self.save(&Tokens::default())
    }

    /// Current access token, if any
    fn access_token(&self) -> ApiResult<Option<String>> {
        Ok(self.load()?.access_token)
    }

    /// Current refresh token, if any
    fn refresh_token(&self) -> ApiResult<Option<String>> {
        Ok(self.load()?.refresh_token)
    }
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Tokens>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with tokens
    #[must_use]
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: RwLock::new(tokens),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Tokens> {
        self.tokens
            .read()
            .map(|t| t.clone())
            .map_err(|_| ApiError::storage("token lock poisoned"))
    }

    fn save(&self, tokens: &Tokens) -> ApiResult<()> {
        let mut guard = self
            .tokens
            .write()
            .map_err(|_| ApiError::storage("token lock poisoned"))?;
        *guard = tokens.clone();
        Ok(())
    }
}

/// JSON file store keyed by `accessToken` / `refreshToken`
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Tokens> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Tokens::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(Tokens::default()),
            Err(e) => Err(ApiError::storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, tokens: &Tokens) -> ApiResult<()> {
        if tokens == &Tokens::default() {
            return self.clear();
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let content = serde_json::to_string_pretty(tokens)?;
        fs::write(&self.path, content).map_err(|e| {
            ApiError::storage(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "Tokens persisted");
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Tokens cleared");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::storage(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
