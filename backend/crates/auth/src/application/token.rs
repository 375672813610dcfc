//! Bearer Tokens
//!
//! Stateless signed tokens of the form
//! `<user_id>.<expires_at_ms>.<base64url(HMAC-SHA256(secret, "<user_id>.<expires_at_ms>"))>`.
//! Revocation happens through the user record: a deactivated user's token is
//! rejected when the user is loaded.

use kernel::id::UserId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// A freshly signed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Sign a token for `user_id` valid for the configured TTL from `now_ms`
pub fn issue_token(config: &AuthConfig, user_id: &UserId, now_ms: i64) -> IssuedToken {
    let expires_at_ms = now_ms + config.token_ttl_ms();
    let payload = format!("{}.{}", user_id, expires_at_ms);
    let signature = hmac_sha256(&config.token_secret, payload.as_bytes());

    IssuedToken {
        token: format!("{}.{}", payload, to_base64url(&signature)),
        expires_at_ms,
    }
}

/// Verify signature and expiry, returning the subject
pub fn verify_token(config: &AuthConfig, token: &str, now_ms: i64) -> AuthResult<UserId> {
    let (payload, signature_b64) = token.rsplit_once('.').ok_or(AuthError::TokenInvalid)?;
    let (user_id_str, expires_str) = payload.split_once('.').ok_or(AuthError::TokenInvalid)?;

    let signature = from_base64url(signature_b64).map_err(|_| AuthError::TokenInvalid)?;
    if !verify_hmac_sha256(&config.token_secret, payload.as_bytes(), &signature) {
        return Err(AuthError::TokenInvalid);
    }

    let expires_at_ms: i64 = expires_str.parse().map_err(|_| AuthError::TokenInvalid)?;
    if expires_at_ms <= now_ms {
        return Err(AuthError::TokenInvalid);
    }

    user_id_str.parse().map_err(|_| AuthError::TokenInvalid)
}
