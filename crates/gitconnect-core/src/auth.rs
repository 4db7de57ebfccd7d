//! Login, registration and logout.
//!
//! These are the only operations that write the session store. The gate is
//! refreshed right after each write so the change is visible without waiting
//! for the next poll.

use std::sync::Arc;

use gitconnect_api::FeedApi;
use gitconnect_model::{ANONYMOUS_NAME, Session};

use crate::error::{FeedError, Result, ValidationError};
use crate::session::{SessionGate, SessionStore};

/// Credentials for a new account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    fn validate(&self) -> Result<()> {
        let required = [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field).into());
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        Ok(())
    }
}

pub struct AuthService<A> {
    api: Arc<A>,
    store: Arc<dyn SessionStore>,
    gate: Arc<SessionGate>,
}

impl<A: FeedApi> AuthService<A> {
    pub fn new(api: Arc<A>, store: Arc<dyn SessionStore>, gate: Arc<SessionGate>) -> Self {
        Self { api, store, gate }
    }

    /// Logs in and persists the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        tracing::debug!("Logging in");
        let response = self
            .api
            .login(email, password)
            .await
            .map_err(FeedError::LoginFailed)
            .inspect_err(|err| tracing::warn!("{}", err))?;

        let username = response
            .user
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        let session = Session::authenticated(response.token, response.user.id, username);
        self.store.store(&session)?;
        self.gate.refresh();

        tracing::info!("Logged in as {}", session.display_name);
        Ok(session)
    }

    /// Creates an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate()?;

        tracing::debug!("Registering {}", registration.username);
        self.api
            .register(
                registration.username.trim(),
                registration.email.trim(),
                &registration.password,
            )
            .await
            .inspect_err(|err| tracing::warn!("Registration failed: {}", err))?;
        tracing::info!("Registered {}", registration.username);
        Ok(())
    }

    /// Forgets the stored session.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        self.gate.refresh();
        tracing::info!("Logged out");
        Ok(())
    }
}
