//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Token signing primitives (random keys, HMAC-SHA256, base64url)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Bearer credential extraction from HTTP headers

pub mod bearer;
pub mod crypto;
pub mod password;
