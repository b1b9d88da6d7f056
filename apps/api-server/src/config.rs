//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use quill_infra::auth::{JwtConfig, PasswordConfig};
#[cfg(feature = "postgres")]
use quill_infra::database::DatabaseConfig;

/// Configuration errors that must stop startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when RUST_ENV is production")]
    DefaultSecretInProduction,

    #[error("JWT_TTL_SECONDS must be between 1 and 2592000 (30 days), got {0}")]
    InvalidTokenTtl(i64),
}

/// Longest token lifetime accepted from configuration (30 days).
const MAX_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// Run pending migrations before serving.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
                connect_timeout: std::time::Duration::from_secs(env_or(
                    "DB_CONNECT_TIMEOUT_SECS",
                    defaults.connect_timeout.as_secs(),
                )),
                acquire_timeout: std::time::Duration::from_secs(env_or(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    defaults.acquire_timeout.as_secs(),
                )),
                ..defaults
            }
        });

        let password_defaults = PasswordConfig::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 5001),
            #[cfg(feature = "postgres")]
            database,
            auto_migrate: env::var("DB_AUTO_MIGRATE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            jwt: Self::jwt_from_env()?,
            password: PasswordConfig {
                memory_kib: env_or("PASSWORD_MEMORY_KIB", password_defaults.memory_kib),
                iterations: env_or("PASSWORD_ITERATIONS", password_defaults.iterations),
                parallelism: env_or("PASSWORD_PARALLELISM", password_defaults.parallelism),
            },
        })
    }

    fn jwt_from_env() -> Result<JwtConfig, ConfigError> {
        let defaults = JwtConfig::default();
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| defaults.secret.clone());

        if secret == defaults.secret {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Ok(JwtConfig {
            secret,
            ttl_seconds: token_ttl(env_or("JWT_TTL_SECONDS", defaults.ttl_seconds))?,
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        })
    }
}

fn token_ttl(seconds: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(ConfigError::InvalidTokenTtl(seconds))
    }
}

/// Parse an env var, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
