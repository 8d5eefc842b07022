//! Login flow.
//!
//! Registration is only attempted for the demo identity, and only when the
//! server actually answered and refused the login. A server that cannot be
//! reached is reported as a network failure.

use tracing::{info, warn};

use crate::api::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::config::DemoConfig;
use crate::core::AuthApi;
use crate::error::BlitzError;

/// Credentials for a login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Display name used if the account has to be registered.
    pub name: Option<String>,
    /// Register the account when the login is refused.
    pub register_if_missing: bool,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            register_if_missing: false,
        }
    }

    /// The shared demo identity.
    #[must_use]
    pub fn demo(config: &DemoConfig) -> Self {
        Self {
            email: config.email.clone(),
            password: config.password.clone(),
            name: Some(config.name.clone()),
            register_if_missing: true,
        }
    }
}

/// Log in, falling back to registration for the demo identity.
///
/// On success the token is attached to `api`.
///
/// # Errors
///
/// - [`BlitzError::Auth`] if the credentials are refused (and registration,
///   when allowed, is refused too)
/// - [`BlitzError::Network`] / [`BlitzError::Api`] if the server could not answer
pub async fn login(api: &dyn AuthApi, credentials: &Credentials) -> Result<AuthResponse, BlitzError> {
    let request = LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };

    let response = match api.login(&request).await {
        Ok(response) => response,
        Err(error) if error.is_credential_rejection() && credentials.register_if_missing => {
            warn!(%error, email = %credentials.email, "login refused; registering demo account");
            register(api, credentials).await?
        }
        Err(error) if error.is_credential_rejection() => {
            return Err(BlitzError::Auth(format!("login refused for {}: {error}", credentials.email)));
        }
        Err(error) => return Err(error),
    };

    info!(email = %credentials.email, "logged in");
    api.attach_token(Some(response.token.clone()));
    Ok(response)
}

async fn register(api: &dyn AuthApi, credentials: &Credentials) -> Result<AuthResponse, BlitzError> {
    let request = RegisterRequest {
        name: credentials.name.clone().unwrap_or_else(|| "Demo".to_string()),
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };

    api.register(&request).await.map_err(|error| match error {
        BlitzError::Api { status, message } if (400..500).contains(&status) => {
            BlitzError::Auth(format!("registration refused ({status}): {message}"))
        }
        BlitzError::Unauthorized(message) => BlitzError::Auth(format!("registration refused: {message}")),
        other => other,
    })
}
