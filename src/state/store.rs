//! Session token persistence.
//!
//! DESIGN
//! ======
//! The token is an opaque string under the storage key `session_token`. It
//! is written at login, read before every request, and removed at logout.
//! `FileTokenStore` is the on-device store; `MemoryTokenStore` backs tests
//! and throwaway sessions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key, also used as the token file name.
pub const TOKEN_KEY: &str = "session_token";

/// Persistent home for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when logged out.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the stored token.
    fn store(&self, token: &str) -> io::Result<()>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> io::Result<()>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Token kept as a single file, `<base_dir>/session_token`.
///
/// Writes go through a temp file and an atomic rename; on Unix the file is
/// restricted to mode 0600.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
}

impl FileTokenStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Open a store in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// created.
    pub fn in_config_dir(app_dir: &str) -> io::Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine config directory"))?
            .join(app_dir);
        Self::open(base_dir)
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.base_dir.join(TOKEN_KEY)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(self.token_path()) {
            Ok(raw) => Ok(non_blank(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        let path = self.token_path();
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, token.trim())?;
        restrict_permissions(&temp_path)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process token store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(non_blank(token)) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.lock().map_err(|_| poisoned())?.clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.token.lock().map_err(|_| poisoned())? = non_blank(token);
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

fn poisoned() -> io::Error {
    io::Error::other("token store lock poisoned")
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
