//! Use-case and router tests for the auth crate, backed by an in-memory repository

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use kernel::id::{ItemId, UserId};
use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::{
    user::User,
    user_overview::{OwnedItemSummary, UserListing, UserStats},
};
use crate::domain::repository::{UserDirectory, UserFilter, UserRepository};
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
struct InMemoryUsers {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    items: Arc<Mutex<Vec<(UserId, OwnedItemSummary)>>>,
}

impl InMemoryUsers {
    fn add_item(&self, owner: UserId, title: &str, status: &str) {
        self.items.lock().unwrap().push((
            owner,
            OwnedItemSummary {
                item_id: ItemId::new(),
                title: title.to_string(),
                status: status.to_string(),
                evaluation_result: None,
            },
        ));
    }

    fn modify(&self, user_id: &UserId, change: impl FnOnce(&mut User)) -> Option<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(user_id)?;
        change(user);
        user.updated_at = chrono::Utc::now();
        Some(user.clone())
    }

    fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().values().any(|u| &u.email == email))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        email: &Email,
        display_name: &DisplayName,
    ) -> AuthResult<Option<User>> {
        Ok(self.modify(user_id, |user| {
            user.email = email.clone();
            user.display_name = display_name.clone();
        }))
    }

    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>> {
        Ok(self.modify(user_id, |user| user.is_active = is_active))
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<User>> {
        Ok(self.modify(user_id, |user| user.user_role = role))
    }
}

/// Wraps a repository and parks every `find_by_id` until released, so a
/// test can run another write between a use case's read and its write
struct PausingUsers {
    inner: Arc<InMemoryUsers>,
    read: Notify,
    resume: Notify,
}

impl PausingUsers {
    fn new(inner: Arc<InMemoryUsers>) -> Self {
        Self {
            inner,
            read: Notify::new(),
            resume: Notify::new(),
        }
    }
}

impl UserRepository for PausingUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.inner.create(user).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let user = self.inner.find_by_id(user_id).await?;
        self.read.notify_one();
        self.resume.notified().await;
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        self.inner.exists_by_email(email).await
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        email: &Email,
        display_name: &DisplayName,
    ) -> AuthResult<Option<User>> {
        self.inner.update_profile(user_id, email, display_name).await
    }

    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>> {
        self.inner.set_active(user_id, is_active).await
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<User>> {
        self.inner.set_role(user_id, role).await
    }
}

impl UserDirectory for InMemoryUsers {
    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AuthResult<Page<UserListing>> {
        let users = self.users.lock().unwrap();
        let items = self.items.lock().unwrap();

        let mut matching: Vec<&User> = users
            .values()
            .filter(|u| filter.role.is_none_or(|r| u.user_role == r))
            .filter(|u| filter.is_active.is_none_or(|a| u.is_active == a))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|u| UserListing {
                user: u.clone(),
                item_count: items.iter().filter(|(owner, _)| owner == &u.user_id).count() as i64,
            })
            .collect();

        Ok(Page::new(rows, total))
    }

    async fn owned_items(&self, user_id: &UserId) -> AuthResult<Vec<OwnedItemSummary>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn stats(&self) -> AuthResult<UserStats> {
        let users = self.users.lock().unwrap();
        let total = users.len() as i64;
        let active = users.values().filter(|u| u.is_active).count() as i64;
        let admins = users.values().filter(|u| u.is_admin()).count() as i64;

        Ok(UserStats {
            total,
            active,
            inactive: total - active,
            admins,
            regular: total - admins,
        })
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::{
        AuthenticateUseCase, GetUserUseCase, ListUsersInput, ListUsersUseCase, LoginInput,
        LoginUseCase, PromoteUserUseCase, RegisterInput, RegisterOutput, RegisterUseCase,
        SetUserStatusUseCase, UpdateProfileInput, UpdateProfileUseCase, UserStatsUseCase,
    };
    use tokio_test::{assert_err, assert_ok};

    const PASSWORD: &str = "correct horse battery";

    fn setup() -> (Arc<InMemoryUsers>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryUsers::default()),
            Arc::new(AuthConfig::development()),
        )
    }

    async fn register(
        repo: &Arc<InMemoryUsers>,
        config: &Arc<AuthConfig>,
        email: &str,
    ) -> AuthResult<RegisterOutput> {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                name: "Test User".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn test_register_creates_regular_user_and_token() {
        let (repo, config) = setup();

        let output = assert_ok!(register(&repo, &config, "Ana@Example.com").await);
        assert_eq!(output.user.user_role, UserRole::User);
        assert_eq!(output.user.email.as_str(), "ana@example.com");

        let auth_user = assert_ok!(
            AuthenticateUseCase::new(repo.clone(), config.clone())
                .execute(&output.token.token)
                .await
        );
        assert_eq!(auth_user.user_id, output.user.user_id);
        assert_eq!(auth_user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (repo, config) = setup();
        assert_ok!(register(&repo, &config, "dup@example.com").await);

        let err = assert_err!(register(&repo, &config, "DUP@example.com").await);
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (repo, config) = setup();

        let err = assert_err!(
            RegisterUseCase::new(repo.clone(), config.clone())
                .execute(RegisterInput {
                    name: "X".to_string(),
                    email: "x@example.com".to_string(),
                    password: PASSWORD.to_string(),
                })
                .await
        );
        assert_eq!(err.status_code().as_u16(), 400);

        let err = assert_err!(
            RegisterUseCase::new(repo.clone(), config.clone())
                .execute(RegisterInput {
                    name: "Xavier".to_string(),
                    email: "x@example.com".to_string(),
                    password: "12345678".to_string(),
                })
                .await
        );
        assert_eq!(err.status_code().as_u16(), 400);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_login() {
        let (repo, config) = setup();
        assert_ok!(register(&repo, &config, "bob@example.com").await);
        let login = LoginUseCase::new(repo.clone(), config.clone());

        let output = assert_ok!(
            login
                .execute(LoginInput {
                    email: " BOB@example.com".to_string(),
                    password: PASSWORD.to_string(),
                })
                .await
        );
        assert_eq!(output.user.email.as_str(), "bob@example.com");

        let err = assert_err!(
            login
                .execute(LoginInput {
                    email: "bob@example.com".to_string(),
                    password: "wrong password".to_string(),
                })
                .await
        );
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = assert_err!(
            login
                .execute(LoginInput {
                    email: "nobody@example.com".to_string(),
                    password: PASSWORD.to_string(),
                })
                .await
        );
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_deactivated_user_cannot_login_or_use_token() {
        let (repo, config) = setup();
        let output = assert_ok!(register(&repo, &config, "carol@example.com").await);

        assert_ok!(
            SetUserStatusUseCase::new(repo.clone())
                .execute(&output.user.user_id, false)
                .await
        );

        let err = assert_err!(
            LoginUseCase::new(repo.clone(), config.clone())
                .execute(LoginInput {
                    email: "carol@example.com".to_string(),
                    password: PASSWORD.to_string(),
                })
                .await
        );
        assert!(matches!(err, AuthError::AccountDisabled));

        let err = assert_err!(
            AuthenticateUseCase::new(repo.clone(), config.clone())
                .execute(&output.token.token)
                .await
        );
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_token_of_unknown_user_rejected() {
        let (repo, config) = setup();
        let token = crate::application::token::issue_token(
            &config,
            &UserId::new(),
            chrono::Utc::now().timestamp_millis(),
        );

        let err = assert_err!(
            AuthenticateUseCase::new(repo, config)
                .execute(&token.token)
                .await
        );
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (repo, config) = setup();
        let dave = assert_ok!(register(&repo, &config, "dave@example.com").await);
        assert_ok!(register(&repo, &config, "erin@example.com").await);
        let update = UpdateProfileUseCase::new(repo.clone());

        let user = assert_ok!(
            update
                .execute(
                    &dave.user.user_id,
                    UpdateProfileInput {
                        name: Some("David".to_string()),
                        email: None,
                    },
                )
                .await
        );
        assert_eq!(user.display_name.as_str(), "David");
        assert_eq!(user.email.as_str(), "dave@example.com");

        let err = assert_err!(
            update
                .execute(
                    &dave.user.user_id,
                    UpdateProfileInput {
                        name: None,
                        email: Some("erin@example.com".to_string()),
                    },
                )
                .await
        );
        assert!(matches!(err, AuthError::EmailTaken));

        // Re-submitting the current email is not a conflict
        assert_ok!(
            update
                .execute(
                    &dave.user.user_id,
                    UpdateProfileInput {
                        name: None,
                        email: Some("DAVE@example.com".to_string()),
                    },
                )
                .await
        );
    }

    #[tokio::test]
    async fn test_profile_edit_keeps_concurrent_deactivation() {
        let (repo, config) = setup();
        let ivy = assert_ok!(register(&repo, &config, "ivy@example.com").await);
        let user_id = ivy.user.user_id;
        let pausing = Arc::new(PausingUsers::new(repo.clone()));

        let edit = {
            let pausing = pausing.clone();
            tokio::spawn(async move {
                UpdateProfileUseCase::new(pausing)
                    .execute(
                        &user_id,
                        UpdateProfileInput {
                            name: Some("Ivy".to_string()),
                            email: None,
                        },
                    )
                    .await
            })
        };

        // The edit has read the still-active user; deactivate before it writes
        pausing.read.notified().await;
        assert_ok!(
            SetUserStatusUseCase::new(repo.clone())
                .execute(&user_id, false)
                .await
        );
        pausing.resume.notify_one();

        let user = assert_ok!(edit.await.unwrap());
        assert_eq!(user.display_name.as_str(), "Ivy");
        assert!(!user.is_active);

        let stored = repo.find_by_id(&user_id).await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.user_role, UserRole::User);
    }

    #[tokio::test]
    async fn test_promotion_keeps_concurrent_deactivation() {
        let (repo, config) = setup();
        let jo = assert_ok!(register(&repo, &config, "jo@example.com").await);
        let user_id = jo.user.user_id;
        let pausing = Arc::new(PausingUsers::new(repo.clone()));

        let promote = {
            let pausing = pausing.clone();
            tokio::spawn(async move { PromoteUserUseCase::new(pausing).execute(&user_id).await })
        };

        pausing.read.notified().await;
        assert_ok!(
            SetUserStatusUseCase::new(repo.clone())
                .execute(&user_id, false)
                .await
        );
        pausing.resume.notify_one();

        let user = assert_ok!(promote.await.unwrap());
        assert!(user.is_admin());
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_promote_and_stats() {
        let (repo, config) = setup();
        let frank = assert_ok!(register(&repo, &config, "frank@example.com").await);
        assert_ok!(register(&repo, &config, "gina@example.com").await);

        let promote = PromoteUserUseCase::new(repo.clone());
        let user = assert_ok!(promote.execute(&frank.user.user_id).await);
        assert!(user.is_admin());

        let missing = assert_ok!(promote.promote_by_email("nobody@example.com").await);
        assert!(missing.is_none());

        let err = assert_err!(promote.execute(&UserId::new()).await);
        assert!(matches!(err, AuthError::UserNotFound));

        let stats = assert_ok!(UserStatsUseCase::new(repo.clone()).execute().await);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.regular, 1);
        assert_eq!(stats.inactive, 0);
    }

    #[tokio::test]
    async fn test_list_and_detail() {
        let (repo, config) = setup();
        let hank = assert_ok!(register(&repo, &config, "hank@example.com").await);
        assert_ok!(register(&repo, &config, "iris@example.com").await);
        repo.add_item(hank.user.user_id, "Air Jordan 1", "pending");
        repo.add_item(hank.user.user_id, "Speedy 30", "approved");

        let output = assert_ok!(
            ListUsersUseCase::new(repo.clone())
                .execute(ListUsersInput {
                    filter: UserFilter::default(),
                    page: PageRequest::new(Some(1), Some(1)),
                })
                .await
        );
        assert_eq!(output.users.len(), 1);
        assert_eq!(output.pagination.total, 2);
        assert_eq!(output.pagination.total_pages, 2);

        let admins = assert_ok!(
            ListUsersUseCase::new(repo.clone())
                .execute(ListUsersInput {
                    filter: UserFilter {
                        role: Some(UserRole::Admin),
                        is_active: None,
                    },
                    page: PageRequest::default(),
                })
                .await
        );
        assert!(admins.users.is_empty());

        let detail = assert_ok!(
            GetUserUseCase::new(repo.clone(), repo.clone())
                .execute(&hank.user.user_id)
                .await
        );
        assert_eq!(detail.items.len(), 2);
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::presentation::router::auth_router_generic;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(repo: InMemoryUsers) -> Router {
        auth_router_generic(repo, AuthConfig::development())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, email: &str) -> (String, String) {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/auth/register",
                None,
                json!({"name": "Test", "email": email, "password": "correct horse battery"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_ignores_requested_role() {
        let app = app(InMemoryUsers::default());
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/auth/register",
                None,
                json!({
                    "name": "Mallory",
                    "email": "mallory@example.com",
                    "password": "correct horse battery",
                    "role": "admin"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["role"], "user");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = app(InMemoryUsers::default());
        register(&app, "same@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/auth/register",
                None,
                json!({"name": "Again", "email": "same@example.com", "password": "correct horse battery"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email is already in use");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = app(InMemoryUsers::default());
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = app(InMemoryUsers::default());
        let (token, _) = register(&app, "pat@example.com").await;

        let (status, body) = send(&app, get("/auth/profile", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token required");

        let (status, _) = send(&app, get("/auth/profile", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, get("/auth/profile", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "pat@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let app = app(InMemoryUsers::default());
        let (token, _) = register(&app, "quinn@example.com").await;

        let (status, body) = send(
            &app,
            json_request("PUT", "/auth/profile", Some(&token), json!({"name": "Quinn Q"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Quinn Q");
        assert_eq!(body["user"]["email"], "quinn@example.com");
    }

    #[tokio::test]
    async fn test_user_admin_requires_admin_role() {
        let repo = InMemoryUsers::default();
        let app = app(repo.clone());
        let (user_token, user_id) = register(&app, "regular@example.com").await;
        let (admin_token, admin_id) = register(&app, "boss@example.com").await;

        let (status, body) = send(&app, get("/users", Some(&user_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Administrator access required");

        // Promote directly in storage; the role is re-read on every request
        let admin_id: UserId = admin_id.parse().unwrap();
        {
            let mut users = repo.users.lock().unwrap();
            let admin = users.get_mut(&admin_id).unwrap();
            admin.user_role = crate::domain::value_object::user_role::UserRole::Admin;
        }

        let (status, body) = send(&app, get("/users?limit=1&page=2", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["users"].as_array().unwrap().len(), 1);
        assert!(body["users"][0]["itemCount"].is_number());

        let (status, body) = send(
            &app,
            json_request("PUT", &format!("/users/{user_id}/promote"), Some(&admin_token), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "admin");

        let (status, body) = send(&app, get("/users/stats", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["admins"], 2);
    }

    #[tokio::test]
    async fn test_deactivate_user_via_api() {
        let repo = InMemoryUsers::default();
        let app = app(repo.clone());
        let (user_token, user_id) = register(&app, "victim@example.com").await;
        let (admin_token, admin_id) = register(&app, "root@example.com").await;
        {
            let admin_id: UserId = admin_id.parse().unwrap();
            let mut users = repo.users.lock().unwrap();
            users.get_mut(&admin_id).unwrap().user_role =
                crate::domain::value_object::user_role::UserRole::Admin;
        }

        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                &format!("/users/{user_id}/status"),
                Some(&admin_token),
                json!({"isActive": false}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["isActive"], false);

        let (status, _) = send(&app, get("/auth/profile", Some(&user_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, get("/users/not-a-uuid", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
