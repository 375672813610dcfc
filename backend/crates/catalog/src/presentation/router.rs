//! Catalog Routers
//!
//! Paths are relative to the API prefix the binary nests them under.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use auth::PgAuthRepository;
use auth::domain::repository::UserRepository;
use auth::middleware::{AuthMiddlewareState, authenticate, authenticate_optional, require_admin};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::image_store::ImageStore;
use crate::domain::repository::{EvaluationRepository, ItemRepository};
use crate::infra::{DiskImageStore, PgCatalogRepository};
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the items + evaluations router with PostgreSQL and disk storage
pub fn catalog_router(
    repo: PgCatalogRepository,
    store: DiskImageStore,
    config: CatalogConfig,
    auth_state: AuthMiddlewareState<PgAuthRepository>,
) -> Router {
    catalog_router_generic(repo, store, config, auth_state)
}

/// Create the router for any repository and image store
///
/// - `/items/public*`, `/evaluations/public*`: optional authentication
/// - `/items`, `/items/my-items`, `/items/{id}`: authenticated (owner or admin)
/// - `GET /items`, `/items/stats`, `/evaluations*`: authenticated admin
pub fn catalog_router_generic<R, S, U>(
    repo: R,
    store: S,
    config: CatalogConfig,
    auth_state: AuthMiddlewareState<U>,
) -> Router
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let body_limit = config.body_limit();
    let state = CatalogAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let public = Router::new()
        .route("/items/public", get(handlers::list_public_items::<R, S>))
        .route("/items/public/{id}", get(handlers::get_public_item::<R, S>))
        .route(
            "/evaluations/public",
            get(handlers::list_public_evaluations::<R, S>),
        )
        .route(
            "/evaluations/public/{id}",
            get(handlers::get_public_evaluation::<R, S>),
        )
        .route_layer(from_fn_with_state(
            auth_state.clone(),
            authenticate_optional::<U>,
        ));

    let owned = Router::new()
        .route("/items", post(handlers::create_item::<R, S>))
        .route("/items/my-items", get(handlers::list_my_items::<R, S>))
        .route(
            "/items/{id}",
            get(handlers::get_item::<R, S>)
                .put(handlers::update_item::<R, S>)
                .delete(handlers::delete_item::<R, S>),
        )
        .route_layer(from_fn_with_state(auth_state.clone(), authenticate::<U>));

    let admin = Router::new()
        .route("/items", get(handlers::list_items::<R, S>))
        .route("/items/stats", get(handlers::item_stats::<R, S>))
        .route(
            "/evaluations",
            get(handlers::list_evaluations::<R, S>).post(handlers::create_evaluation::<R, S>),
        )
        .route(
            "/evaluations/my-evaluations",
            get(handlers::list_my_evaluations::<R, S>),
        )
        .route("/evaluations/stats", get(handlers::evaluation_stats::<R, S>))
        .route(
            "/evaluations/{id}",
            get(handlers::get_evaluation::<R, S>)
                .put(handlers::update_evaluation::<R, S>)
                .delete(handlers::delete_evaluation::<R, S>),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(auth_state, authenticate::<U>));

    Router::new()
        .merge(public)
        .merge(owned)
        .merge(admin)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
