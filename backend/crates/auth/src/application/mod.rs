//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod profile;
pub mod promote_user;
pub mod register;
pub mod set_user_status;
pub mod token;
pub mod user_stats;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use get_user::{GetUserUseCase, UserDetail};
pub use list_users::{ListUsersInput, ListUsersOutput, ListUsersUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use promote_user::PromoteUserUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use set_user_status::SetUserStatusUseCase;
pub use token::IssuedToken;
pub use user_stats::UserStatsUseCase;
