//! Token persistence for the sign-up response
//!
//! The mutation's response payload is opaque to this client; it is written
//! verbatim, with a timestamp, under the user's config directory.

use anyhow::Result;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A stored sign-up token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// The mutation's response payload, verbatim
    pub payload: Value,
    pub saved_at: DateTime<Utc>,
}

/// Writes and reads the token file
pub struct TokenStore {
    path: Option<PathBuf>,
}

impl TokenStore {
    pub fn new() -> Self {
        let path = ProjectDirs::from("health", "sereno", "sereno-signup")
            .map(|dirs| dirs.config_dir().join("token.json"));
        Self { path }
    }

    /// Store backed by an explicit file path
    pub fn at_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist the payload, stamping it with the current time
    pub fn save(&self, payload: Value) -> Result<StoredToken> {
        let token = StoredToken {
            payload,
            saved_at: Utc::now(),
        };
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&token)?)?;
            tracing::info!(path = %path.display(), "token saved");
        }
        Ok(token)
    }

    /// Load a previously saved token, if any
    #[allow(dead_code)]
    pub fn load(&self) -> Result<Option<StoredToken>> {
        match &self.path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)?;
                Ok(Some(serde_json::from_str(&content)?))
            }
            _ => Ok(None),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
