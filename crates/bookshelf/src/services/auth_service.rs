//! Authentication service

use crate::actions::Credentials;
use crate::state::User;
use async_trait::async_trait;
use bookshelf_config::AuthConfig;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Rejected with a message from the backend
    #[error("{0}")]
    Rejected(String),
}

/// Checks credentials against an authentication backend
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;
}

/// In-process service accepting a single configured username
///
/// Any password is accepted. Every call waits for the configured latency to
/// imitate a network round trip.
#[derive(Debug, Clone)]
pub struct DemoAuthService {
    username: String,
    display_name: String,
    latency: Duration,
}

impl DemoAuthService {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            display_name: config.display_name.clone(),
            latency: Duration::from_millis(config.latency_ms),
        }
    }
}

#[async_trait]
impl AuthService for DemoAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        log::debug!("DemoAuthService: login attempt for {}", credentials.username);
        tokio::time::sleep(self.latency).await;

        if credentials.username != self.username {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(User::new(self.display_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn service() -> DemoAuthService {
        DemoAuthService::from_config(&AuthConfig {
            latency_ms: 0,
            ..AuthConfig::default()
        })
    }

    #[tokio::test]
    async fn test_configured_user_logs_in() {
        let user = service()
            .login(&Credentials::new("test", "anything"))
            .await
            .unwrap();
        assert_eq!(user, User::new("User"));
    }

    #[tokio::test]
    async fn test_other_users_are_rejected() {
        let error = service()
            .login(&Credentials::new("mallory", "anything"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid username or password");
    }
}
