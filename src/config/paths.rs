//! Path resolution for blitz configuration and data files.
//!
//! All blitz data is stored in `~/.blitz/`:
//! - `config.yaml` - Main configuration file
//! - `token` - Bearer token of the logged-in user
//! - `user.json` - Profile returned at login
//! - `blitz.log` - Log file written by the dashboard

use std::path::PathBuf;

use crate::error::BlitzError;

/// Paths to blitz configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.blitz/`
    pub root: PathBuf,
    /// Config file: `~/.blitz/config.yaml`
    pub config_file: PathBuf,
    /// Token file: `~/.blitz/token`
    pub token_file: PathBuf,
    /// Profile file: `~/.blitz/user.json`
    pub user_file: PathBuf,
    /// Log file: `~/.blitz/blitz.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BlitzError> {
        let home = std::env::var("HOME")
            .map_err(|_| BlitzError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".blitz")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            token_file: root.join("token"),
            user_file: root.join("user.json"),
            log_file: root.join("blitz.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BlitzError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                BlitzError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".blitz"))
        })
    }
}
