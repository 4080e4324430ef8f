/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Persistence of token pairs, one record per identity
//!
//! Records are keyed by the SHA-256 of the identity, hex encoded in lower case,
//! so several identities can share a directory and the mapping is stable
//! across runs.

use crate::error::AppError;
use crate::model::auth::TokenPair;
use crate::utils::id::get_id;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Loads and saves the token pair of an identity
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored pair, or an empty pair when nothing usable is stored
    async fn load(&self, identity: &str) -> TokenPair;

    /// Replaces the stored pair
    async fn save(&self, identity: &str, tokens: &TokenPair) -> Result<(), AppError>;
}

/// Storage key of an identity: lower case hex SHA-256 of its UTF-8 bytes
#[must_use]
pub fn token_key(identity: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Stores each identity in `<dir>/<token_key>.json`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Creates a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the record of `identity`
    #[must_use]
    pub fn path_for(&self, identity: &str) -> PathBuf {
        self.dir.join(format!("{}.json", token_key(identity)))
    }

    fn read(path: &Path) -> Result<Option<TokenPair>, AppError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a temporary file in the same directory, then renames it over the record
    fn write_atomic(&self, path: &Path, tokens: &TokenPair) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;

        let contents = serde_json::to_vec(tokens)?;
        let tmp = self.dir.join(format!(".{}.tmp", get_id()));

        let written = create_private(&tmp).and_then(|mut file| {
            file.write_all(&contents)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create_new(true).open(path)
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, identity: &str) -> TokenPair {
        let path = self.path_for(identity);
        match Self::read(&path) {
            Ok(Some(tokens)) => {
                debug!("Loaded tokens from {}", path.display());
                tokens
            }
            Ok(None) => {
                debug!("No stored tokens at {}", path.display());
                TokenPair::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable token file {}: {}", path.display(), e);
                TokenPair::default()
            }
        }
    }

    async fn save(&self, identity: &str, tokens: &TokenPair) -> Result<(), AppError> {
        let path = self.path_for(identity);
        self.write_atomic(&path, tokens)?;
        debug!("Saved tokens to {}", path.display());
        Ok(())
    }
}

/// Keeps records in memory, for tests and sessions that must not touch the disk
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    records: Mutex<HashMap<String, TokenPair>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `tokens` for `identity`
    pub fn with_tokens(identity: &str, tokens: TokenPair) -> Self {
        let mut records = HashMap::new();
        records.insert(token_key(identity), tokens);
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, identity: &str) -> TokenPair {
        self.records
            .lock()
            .await
            .get(&token_key(identity))
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, identity: &str, tokens: &TokenPair) -> Result<(), AppError> {
        self.records
            .lock()
            .await
            .insert(token_key(identity), tokens.clone());
        Ok(())
    }
}
