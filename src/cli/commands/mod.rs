//! Command implementations for blitz.
//!
//! Every handler returns the text to print. Handlers that talk to the
//! server take a [`Context`] holding the loaded config and API client.

mod auth;
mod completions;
mod focus;
mod project;
mod task;

pub use auth::{login, logout, whoami};
pub use completions::completions;
pub use focus::focus;
pub use project::project;
pub use task::task;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::ApiClient;
use crate::cli::args::{Cli, OutputFormat};
use crate::config::{Config, Paths, TokenStore};
use crate::error::BlitzError;

/// Everything a command needs: config, token store and a client.
pub struct Context {
    pub config: Config,
    pub paths: Paths,
    pub tokens: TokenStore,
    pub client: Arc<ApiClient>,
    pub format: OutputFormat,
}

impl Context {
    /// Load config and the stored token, applying command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or the HTTP client
    /// cannot be built.
    pub fn new(cli: &Cli) -> Result<Self, BlitzError> {
        let paths = Paths::new()?;
        let mut config = Config::load_from_path(&paths.config_file)?;
        if let Some(url) = &cli.api_url {
            config.api.base_url.clone_from(url);
        }
        Self::with_config(config, paths, cli.output)
    }

    /// Build a context around an already loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(
        config: Config,
        paths: Paths,
        format: Option<OutputFormat>,
    ) -> Result<Self, BlitzError> {
        let tokens = TokenStore::new(&paths);
        let client = ApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?
        .with_token(tokens.load());
        debug!(base_url = client.base_url(), authenticated = client.is_authenticated(), "client ready");

        Ok(Self {
            format: format.unwrap_or(config.general.default_output),
            config,
            paths,
            tokens,
            client: Arc::new(client),
        })
    }

    /// Fail early when no token is available.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a token.
    pub fn require_auth(&self) -> Result<(), BlitzError> {
        if self.client.is_authenticated() {
            Ok(())
        } else {
            Err(BlitzError::NotAuthenticated)
        }
    }
}
