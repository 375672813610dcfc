//! Auth Middleware
//!
//! Bearer-token middleware for protected routes. Install with
//! `axum::middleware::from_fn_with_state`; `require_admin` goes inside
//! `authenticate` (i.e. is added as an earlier `route_layer`).

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::auth_user::{AuthUser, Caller};
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// Rejects the request with 401 unless it carries a valid token of an
/// active user. Stores [`AuthUser`] in request extensions.
pub async fn authenticate<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers())?.to_owned();

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let auth_user = use_case.execute(&token).await?;

    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Never rejects. Stores a [`Caller`] that is anonymous when the token is
/// absent or invalid.
pub async fn authenticate_optional<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers()).ok().map(str::to_owned);

    let caller = match token {
        Some(token) => {
            let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
            match use_case.execute(&token).await {
                Ok(auth_user) => Caller(Some(auth_user)),
                Err(e) => {
                    tracing::debug!(error = %e, "Optional authentication failed, continuing anonymously");
                    Caller::anonymous()
                }
            }
        }
        None => Caller::anonymous(),
    };

    req.extensions_mut().insert(caller);

    next.run(req).await
}

/// Requires an admin [`AuthUser`] set by [`authenticate`]
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    match req.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(AuthError::AdminRequired),
        None => Err(AuthError::TokenMissing),
    }
}
