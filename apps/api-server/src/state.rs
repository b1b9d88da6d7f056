//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_core::services::{AuthGate, CredentialStore, PostService};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialStore>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
    pub gate: Arc<AuthGate>,
}

impl AppState {
    /// Wire the services over the given stores and auth primitives.
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            credentials: Arc::new(CredentialStore::new(users, passwords)),
            posts: Arc::new(PostService::new(posts)),
            gate: Arc::new(AuthGate::new(tokens.clone())),
            tokens,
        }
    }

    /// State backed by the in-memory stores.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            tokens,
            passwords,
        )
    }

    /// Build the application state from configuration.
    ///
    /// Uses Postgres when `DATABASE_URL` is set, the in-memory stores otherwise.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> =
            Arc::new(Argon2PasswordService::with_config(config.password)?);

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                use migration::{Migrator, MigratorTrait};
                use quill_infra::database::{PostgresPostRepository, PostgresUserRepository, connect};

                let conn = connect(db_config).await?;

                if config.auto_migrate {
                    tracing::info!("Applying pending migrations");
                    Migrator::up(&conn, None).await?;
                }

                tracing::info!("Application state initialized (postgres)");
                return Ok(Self::new(
                    Arc::new(PostgresUserRepository::new(conn.clone())),
                    Arc::new(PostgresPostRepository::new(conn)),
                    tokens,
                    passwords,
                ));
            }
        }

        tracing::warn!("DATABASE_URL not set. Using in-memory stores; data is lost on restart.");
        Ok(Self::in_memory(tokens, passwords))
    }
}
