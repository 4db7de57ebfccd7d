//! Persisted client-local state.
//!
//! Holds what the client keeps between runs: the session token, user id and
//! username written at login, and the dark-mode preference. Stored as TOML
//! in the user's data directory. The core only checks for presence of these
//! values; it never interprets the token.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use gitconnect_model::{ANONYMOUS_NAME, Session};
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};
use crate::session::{SessionSource, SessionStore};

/// Session fields as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// UI preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
}

/// Everything persisted locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalState {
    pub session: StoredSession,
    pub preferences: Preferences,
}

impl LocalState {
    /// The session described by the stored fields.
    pub fn session(&self) -> Session {
        Session {
            token: self.session.token.clone(),
            user_id: self.session.user_id.clone(),
            display_name: self
                .session
                .username
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
        }
    }
}

/// File-backed local state.
///
/// Every read goes to disk, so a login or logout performed by another
/// process is picked up on the next session poll. A read failure is logged
/// at warn level once and at debug level while it repeats.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    last_read_error: Arc<Mutex<Option<String>>>,
}

impl LocalStore {
    /// Store at the default location in the user's data directory.
    pub fn open_default() -> Self {
        Self::at(Self::default_path())
    }

    /// Store at a specific path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_read_error: Arc::default(),
        }
    }

    /// Get the default state file path.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "GitConnect", "gitconnect")
            .map(|dirs| dirs.data_dir().join("state.toml"))
            .unwrap_or_else(|| PathBuf::from("gitconnect-state.toml"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file yields the default state.
    pub fn load(&self) -> Result<LocalState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LocalState::default());
            }
            Err(source) => {
                return Err(FeedError::Store {
                    operation: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|e| FeedError::StoreFormat {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Save the state atomically.
    pub fn save(&self, state: &LocalState) -> Result<()> {
        let content = toml::to_string_pretty(state).map_err(|e| FeedError::StoreFormat {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        write_atomic(&self.path, content.as_bytes())
    }

    /// Load, modify and save the state.
    pub fn update(&self, f: impl FnOnce(&mut LocalState)) -> Result<LocalState> {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }

    /// Stored dark-mode preference.
    pub fn dark_mode(&self) -> Result<bool> {
        Ok(self.load()?.preferences.dark_mode)
    }

    /// Remembers a failed session read. Returns `true` when it differs from
    /// the previous failure.
    fn note_read_failure(&self, err: &FeedError) -> bool {
        let message = err.to_string();
        let mut last = self
            .last_read_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if last.as_deref() == Some(message.as_str()) {
            return false;
        }
        *last = Some(message);
        true
    }

    fn clear_read_failure(&self) {
        self.last_read_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Persist the dark-mode preference.
    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.update(|state| state.preferences.dark_mode = enabled)?;
        tracing::debug!("Dark mode set to {}", enabled);
        Ok(())
    }
}

impl SessionSource for LocalStore {
    fn read(&self) -> Session {
        match self.load() {
            Ok(state) => {
                self.clear_read_failure();
                state.session()
            }
            Err(err) => {
                if self.note_read_failure(&err) {
                    tracing::warn!("Treating session as logged out: {}", err);
                } else {
                    tracing::debug!("Session still unreadable: {}", err);
                }
                Session::anonymous()
            }
        }
    }
}

impl SessionStore for LocalStore {
    fn store(&self, session: &Session) -> Result<()> {
        self.update(|state| {
            state.session = StoredSession {
                token: session.token.clone(),
                user_id: session.user_id.clone(),
                username: Some(session.display_name.clone()),
            };
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.update(|state| state.session = StoredSession::default())?;
        Ok(())
    }
}

/// Write `bytes` to `path` through a temp file and rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FeedError::Store {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| FeedError::Store {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| FeedError::Store {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| FeedError::Store {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| FeedError::Store {
        operation: "replace",
        path: path.to_path_buf(),
        source: e,
    })
}
