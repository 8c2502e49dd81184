use std::sync::Arc;

use tracing::{info, warn};

use crate::{error::ClientError, ports::AuthPort};

/// Message shown by the login form for any failed sign-in.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid credentials. Please try again.";

/// Authentication state for one running admin client.
pub struct Session {
    auth: Arc<dyn AuthPort>,
    is_authenticated: bool,
    username: Option<String>,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self {
            auth,
            is_authenticated: false,
            username: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            warn!("login rejected: empty username or password");
            return Err(ClientError::InvalidCredentials);
        }

        if let Err(err) = self.auth.login(username, password).await {
            warn!(%username, error = %err, "login failed");
            return Err(err);
        }

        self.is_authenticated = true;
        self.username = Some(username.trim().to_string());
        info!(%username, "signed in");
        Ok(())
    }

    /// Always leaves the session signed out, even when the backend call fails.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self.auth.logout().await;
        if let Err(err) = &result {
            warn!(error = %err, "logout call failed; clearing local session anyway");
        }
        self.expire();
        info!("signed out");
        result
    }

    /// Drops local authentication without contacting the backend.
    pub fn expire(&mut self) {
        self.is_authenticated = false;
        self.username = None;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
