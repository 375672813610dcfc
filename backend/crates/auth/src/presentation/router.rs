//! Auth Routers
//!
//! Paths are relative to the API prefix the binary nests them under.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{UserDirectory, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, authenticate, require_admin};

/// Create the Auth + user administration router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create the router for any repository implementation
///
/// - `/auth/register`, `/auth/login`: public
/// - `/auth/profile`: authenticated
/// - `/users/*`: authenticated admin
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let middleware_state = AuthMiddlewareState::new(state.repo.clone(), state.config.clone());

    let profile = Router::new()
        .route(
            "/auth/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route_layer(from_fn_with_state(
            middleware_state.clone(),
            authenticate::<R>,
        ));

    let users = Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route("/users/stats", get(handlers::user_stats::<R>))
        .route("/users/{id}", get(handlers::get_user::<R>))
        .route("/users/{id}/status", put(handlers::set_user_status::<R>))
        .route("/users/{id}/promote", put(handlers::promote_user::<R>))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(middleware_state, authenticate::<R>));

    Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .merge(profile)
        .merge(users)
        .with_state(state)
}
