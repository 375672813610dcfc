//! Process configuration
//!
//! Read once from the environment (after `.env` is loaded) and handed to the
//! routers as explicit structs.

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use catalog::CatalogConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_TOKEN_TTL_HOURS: u64 = 7 * 24;

pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub bootstrap_admin_email: Option<String>,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 5)?;
        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3001")?;

        let frontend_origins = split_list(&var_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS));
        let bootstrap_admin_email = env::var("BOOTSTRAP_ADMIN_EMAIL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            bootstrap_admin_email,
            auth: auth_config()?,
            catalog: catalog_config()?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let token_ttl = token_ttl(parse_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?)?;

    let base = match env::var("TOKEN_SECRET") {
        Ok(secret_b64) => {
            let bytes = general_purpose::STANDARD
                .decode(secret_b64.trim())
                .context("TOKEN_SECRET must be standard base64")?;
            let token_secret: [u8; 32] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to exactly 32 bytes"))?;
            AuthConfig {
                token_secret,
                ..AuthConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set, using a random secret; tokens will not survive a restart");
            AuthConfig::development()
        }
        Err(_) => bail!("TOKEN_SECRET must be set in release builds"),
    };

    Ok(AuthConfig {
        token_ttl,
        password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
        ..base
    })
}

fn token_ttl(hours: u64) -> anyhow::Result<Duration> {
    if hours == 0 {
        bail!("TOKEN_TTL_HOURS must be at least 1");
    }
    let secs = hours
        .checked_mul(3600)
        .context("TOKEN_TTL_HOURS is too large")?;
    Ok(Duration::from_secs(secs))
}

fn catalog_config() -> anyhow::Result<CatalogConfig> {
    let defaults = CatalogConfig::default();

    let allowed_types = env::var("ALLOWED_FILE_TYPES")
        .map(|v| split_list(&v))
        .unwrap_or(defaults.allowed_types);

    Ok(CatalogConfig {
        upload_dir: env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir),
        max_file_size: parse_or("MAX_FILE_SIZE", defaults.max_file_size)?,
        allowed_types,
        ..CatalogConfig::default()
    })
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
