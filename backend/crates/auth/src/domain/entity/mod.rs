pub mod auth_user;
pub mod user;
pub mod user_overview;
