//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::pagination::PageInfo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{
    user::User,
    user_overview::{OwnedItemSummary, UserListing, UserStats},
};

// ============================================================================
// Register / Login
// ============================================================================

/// Register request. Unknown fields (including `role`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `{message?, user, token?}`
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// ============================================================================
// Profile
// ============================================================================

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ============================================================================
// User administration
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusRequest {
    pub is_active: bool,
}

/// Public user representation; never includes the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            name: user.display_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.user_role.code().to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{message?, user}`
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: T,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    #[serde(flatten)]
    pub user: UserResponse,
    pub item_count: i64,
}

impl From<&UserListing> for UserListItem {
    fn from(listing: &UserListing) -> Self {
        Self {
            user: UserResponse::from(&listing.user),
            item_count: listing.item_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserListItem>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedItemResponse {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub evaluation_result: Option<String>,
}

impl From<&OwnedItemSummary> for OwnedItemResponse {
    fn from(item: &OwnedItemSummary) -> Self {
        Self {
            id: item.item_id.into_uuid(),
            title: item.title.clone(),
            status: item.status.clone(),
            evaluation_result: item.evaluation_result.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub items: Vec<OwnedItemResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStatsBody {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub admins: i64,
    pub regular: i64,
}

impl From<UserStats> for UserStatsBody {
    fn from(stats: UserStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            inactive: stats.inactive,
            admins: stats.admins,
            regular: stats.regular,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStatsResponse {
    pub stats: UserStatsBody,
}
