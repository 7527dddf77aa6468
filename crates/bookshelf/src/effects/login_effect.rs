//! Login Effect
//!
//! Turns a `Login` action into exactly one `LoginSuccess` or `LoginFailure`.
//! Further logins are ignored while a call is in flight.

use crate::actions::{auth::LOGIN, Action, AuthAction};
use crate::services::AuthService;
use async_trait::async_trait;
use bookshelf_store::Effect;
use std::sync::Arc;

pub struct LoginEffect {
    service: Arc<dyn AuthService>,
}

impl LoginEffect {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Effect<Action> for LoginEffect {
    fn name(&self) -> &'static str {
        "LoginEffect"
    }

    fn kinds(&self) -> &'static [&'static str] {
        &[LOGIN]
    }

    async fn run(&self, action: Action) -> Vec<Action> {
        let Action::Auth(AuthAction::Login(credentials)) = action else {
            return Vec::new();
        };

        match self.service.login(&credentials).await {
            Ok(user) => {
                log::info!("LoginEffect: {} logged in", user.name);
                vec![AuthAction::LoginSuccess {
                    user: Arc::new(user),
                }
                .into()]
            }
            Err(e) => {
                log::warn!("LoginEffect: login of {} failed: {}", credentials.username, e);
                vec![AuthAction::LoginFailure(e.to_string()).into()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Credentials;
    use crate::services::{AuthError, DemoAuthService};
    use crate::state::User;
    use bookshelf_config::AuthConfig;
    use pretty_assertions::assert_eq;

    fn effect() -> LoginEffect {
        LoginEffect::new(Arc::new(DemoAuthService::from_config(&AuthConfig {
            latency_ms: 0,
            ..AuthConfig::default()
        })))
    }

    #[tokio::test]
    async fn test_success_maps_to_login_success() {
        let actions = effect()
            .run(AuthAction::Login(Credentials::new("test", "pw")).into())
            .await;

        assert_eq!(
            actions,
            vec![Action::Auth(AuthAction::LoginSuccess {
                user: Arc::new(User::new("User")),
            })]
        );
    }

    #[tokio::test]
    async fn test_failure_maps_to_login_failure() {
        let actions = effect()
            .run(AuthAction::Login(Credentials::new("nobody", "pw")).into())
            .await;

        assert_eq!(
            actions,
            vec![Action::Auth(AuthAction::LoginFailure(
                AuthError::InvalidCredentials.to_string()
            ))]
        );
    }

    #[tokio::test]
    async fn test_other_actions_produce_nothing() {
        assert!(effect().run(AuthAction::Logout.into()).await.is_empty());
    }
}
