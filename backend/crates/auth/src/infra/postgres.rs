//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{ItemId, UserId};
use kernel::pagination::{Page, PageRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    user::User,
    user_overview::{OwnedItemSummary, UserListing, UserStats},
};
use crate::domain::repository::{UserDirectory, UserFilter, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    display_name,
    password_hash,
    user_role,
    is_active,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                display_name,
                password_hash,
                user_role,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.display_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        email: &Email,
        display_name: &DisplayName,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                email = $2,
                display_name = $3,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(email.as_str())
        .bind(display_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET is_active = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET user_role = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(role.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// User Directory Implementation
// ============================================================================

impl UserDirectory for PgAuthRepository {
    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AuthResult<Page<UserListing>> {
        let role = filter.role.map(|r| r.id());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::smallint IS NULL OR user_role = $1)
              AND ($2::bool IS NULL OR is_active = $2)
            "#,
        )
        .bind(role)
        .bind(filter.is_active)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, UserListingRow>(
            r#"
            SELECT
                u.user_id,
                u.email,
                u.display_name,
                u.password_hash,
                u.user_role,
                u.is_active,
                u.created_at,
                u.updated_at,
                (SELECT COUNT(*) FROM items i WHERE i.owner_id = u.user_id) AS item_count
            FROM users u
            WHERE ($1::smallint IS NULL OR u.user_role = $1)
              AND ($2::bool IS NULL OR u.is_active = $2)
            ORDER BY u.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(role)
        .bind(filter.is_active)
        .bind(page.limit() as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .into_iter()
            .map(|r| {
                let item_count = r.item_count;
                r.user.into_user().map(|user| UserListing { user, item_count })
            })
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(Page::new(users, total))
    }

    async fn owned_items(&self, user_id: &UserId) -> AuthResult<Vec<OwnedItemSummary>> {
        // Codes mirror the catalog's smallint encodings (see migrations)
        let rows = sqlx::query_as::<_, OwnedItemRow>(
            r#"
            SELECT
                i.item_id,
                i.title,
                CASE i.item_status
                    WHEN 1 THEN 'approved'
                    WHEN 2 THEN 'rejected'
                    ELSE 'pending'
                END AS status,
                CASE e.result
                    WHEN 0 THEN 'authentic'
                    WHEN 1 THEN 'fake'
                    WHEN 2 THEN 'inconclusive'
                END AS evaluation_result
            FROM items i
            LEFT JOIN evaluations e ON e.item_id = i.item_id
            WHERE i.owner_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| OwnedItemSummary {
                item_id: ItemId::from_uuid(r.item_id),
                title: r.title,
                status: r.status,
                evaluation_result: r.evaluation_result,
            })
            .collect())
    }

    async fn stats(&self) -> AuthResult<UserStats> {
        let row = sqlx::query_as::<_, UserStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE is_active) AS active,
                COUNT(*) FILTER (WHERE user_role = $1) AS admins,
                COUNT(*) FILTER (WHERE user_role = $2) AS regular
            FROM users
            "#,
        )
        .bind(UserRole::Admin.id())
        .bind(UserRole::User.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStats {
            total: row.total,
            active: row.active,
            inactive: row.total - row.active,
            admins: row.admins,
            regular: row.regular,
        })
    }
}

fn map_unique_email(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    display_name: String,
    password_hash: String,
    user_role: i16,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            display_name: DisplayName::from_db(self.display_name),
            password_hash,
            user_role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserListingRow {
    #[sqlx(flatten)]
    user: UserRow,
    item_count: i64,
}

#[derive(sqlx::FromRow)]
struct OwnedItemRow {
    item_id: Uuid,
    title: String,
    status: String,
    evaluation_result: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserStatsRow {
    total: i64,
    active: i64,
    admins: i64,
    regular: i64,
}
