//! Bearer token persistence.
//!
//! The token is kept in `~/.blitz/token` and rehydrated on start. The
//! `BLITZ_TOKEN` environment variable takes precedence over the file. The
//! profile returned at login sits next to it in `user.json`.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::api::User;
use crate::config::Paths;
use crate::error::BlitzError;

const TOKEN_ENV: &str = "BLITZ_TOKEN";

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    user_path: PathBuf,
    read_env: bool,
}

impl TokenStore {
    /// Store under the given paths, honouring `BLITZ_TOKEN`.
    #[must_use]
    pub fn new(paths: &Paths) -> Self {
        Self {
            path: paths.token_file.clone(),
            user_path: paths.user_file.clone(),
            read_env: true,
        }
    }

    /// Store that only looks at the file (useful for testing).
    #[must_use]
    pub fn file_only(path: PathBuf) -> Self {
        Self {
            user_path: path.with_file_name("user.json"),
            path,
            read_env: false,
        }
    }

    /// Load the token. Priority: `BLITZ_TOKEN` env → token file.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        if self.read_env {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                if !token.trim().is_empty() {
                    debug!("using token from {TOKEN_ENV}");
                    return Some(token.trim().to_string());
                }
            }
        }

        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    /// Persist the token, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn store(&self, token: &str) -> Result<(), BlitzError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        restrict_permissions(&self.path)?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Remember the profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn store_user(&self, user: &User) -> Result<(), BlitzError> {
        if let Some(parent) = self.user_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.user_path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }

    /// Profile saved at the last login. Unreadable files count as missing.
    #[must_use]
    pub fn load_user(&self) -> Option<User> {
        let contents = fs::read_to_string(&self.user_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Remove the stored token and profile. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), BlitzError> {
        for path in [&self.path, &self.user_path] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<(), BlitzError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<(), BlitzError> {
    Ok(())
}
