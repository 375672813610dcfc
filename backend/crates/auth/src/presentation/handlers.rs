//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use kernel::pagination::PageRequest;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    GetProfileUseCase, GetUserUseCase, ListUsersInput, ListUsersUseCase, LoginInput,
    LoginUseCase, PromoteUserUseCase, RegisterInput, RegisterUseCase, SetUserStatusUseCase,
    UpdateProfileInput, UpdateProfileUseCase, UserStatsUseCase,
};
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::{UserDirectory, UserFilter, UserRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, ListUsersQuery, LoginRequest, OwnedItemResponse, RegisterRequest,
    UpdateProfileRequest, UserDetailResponse, UserEnvelope, UserListItem, UserListResponse,
    UserResponse, UserStatsResponse, UserStatusRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: Some("User created successfully".to_string()),
            user: UserResponse::from(&output.user),
            token: Some(output.token.token),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        message: Some("Login successful".to_string()),
        user: UserResponse::from(&output.user),
        token: Some(output.token.token),
    }))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/auth/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AuthResult<Json<UserEnvelope<UserResponse>>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(&auth_user.user_id).await?;

    Ok(Json(UserEnvelope {
        message: None,
        user: UserResponse::from(&user),
    }))
}

/// PUT /api/auth/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AuthResult<Json<UserEnvelope<UserResponse>>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone());
    let user = use_case
        .execute(
            &auth_user.user_id,
            UpdateProfileInput {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(UserEnvelope {
        message: Some("Profile updated successfully".to_string()),
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// User administration (requires admin)
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<ListUsersQuery>,
) -> AuthResult<Json<UserListResponse>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let filter = UserFilter {
        role: query
            .role
            .as_deref()
            .map(|code| {
                UserRole::from_code(code)
                    .ok_or_else(|| AppError::bad_request(format!("Invalid role filter: {code}")))
            })
            .transpose()?,
        is_active: query
            .is_active
            .as_deref()
            .map(|v| {
                v.parse::<bool>()
                    .map_err(|_| AppError::bad_request("isActive must be true or false"))
            })
            .transpose()?,
    };

    let use_case = ListUsersUseCase::new(state.repo.clone());
    let output = use_case
        .execute(ListUsersInput {
            filter,
            page: PageRequest::from_query(query.page.as_deref(), query.limit.as_deref()),
        })
        .await?;

    Ok(Json(UserListResponse {
        users: output.users.iter().map(UserListItem::from).collect(),
        pagination: output.pagination,
    }))
}

/// GET /api/users/stats
pub async fn user_stats<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<UserStatsResponse>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let stats = UserStatsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(UserStatsResponse {
        stats: stats.into(),
    }))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserEnvelope<UserDetailResponse>>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = GetUserUseCase::new(state.repo.clone(), state.repo.clone());
    let detail = use_case.execute(&user_id).await?;

    Ok(Json(UserEnvelope {
        message: None,
        user: UserDetailResponse {
            user: UserResponse::from(&detail.user),
            items: detail.items.iter().map(OwnedItemResponse::from).collect(),
        },
    }))
}

/// PUT /api/users/{id}/status
pub async fn set_user_status<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<UserStatusRequest>, JsonRejection>,
) -> AuthResult<Json<UserEnvelope<UserResponse>>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let Json(req) = payload?;

    let use_case = SetUserStatusUseCase::new(state.repo.clone());
    let user = use_case.execute(&user_id, req.is_active).await?;

    let message = if user.is_active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };

    Ok(Json(UserEnvelope {
        message: Some(message.to_string()),
        user: UserResponse::from(&user),
    }))
}

/// PUT /api/users/{id}/promote
pub async fn promote_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserEnvelope<UserResponse>>>
where
    R: UserRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = PromoteUserUseCase::new(state.repo.clone());
    let user = use_case.execute(&user_id).await?;

    Ok(Json(UserEnvelope {
        message: Some("User promoted to admin successfully".to_string()),
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// An id that is not a UUID cannot name an existing user
fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}
