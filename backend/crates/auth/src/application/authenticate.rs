//! Authenticate Use Case
//!
//! Resolves a bearer token to an active user.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::verify_token;
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Verify the token and load its user.
    ///
    /// The role comes from the stored user, so a promotion or deactivation
    /// takes effect on the next request.
    pub async fn execute(&self, token: &str) -> AuthResult<AuthUser> {
        let user_id = verify_token(&self.config, token, Utc::now().timestamp_millis())?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if !user.is_active {
            return Err(AuthError::TokenInvalid);
        }

        Ok(AuthUser {
            user_id: user.user_id,
            role: user.user_role,
        })
    }
}
