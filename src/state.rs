use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Context;
use governor::DefaultKeyedRateLimiter;
use ridegate_config::{CorsConfig, JwtConfig, PasswordConfig, RateLimitConfig};
use ridegate_db::{
    MEMORY_URL_SCHEME, MemoryUserRepository, PgUserRepository, UserRepository, init_db_pool,
};
use tracing::{info, warn};

pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    /// `None` when `RATE_LIMIT_MAX_REQUESTS` is `0`.
    pub rate_limiter: Option<Arc<IpRateLimiter>>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        let rate_limiter = rate_limit_config.keyed_limiter().map(Arc::new);
        Self {
            users,
            jwt_config,
            password_config,
            cors_config,
            rate_limit_config,
            rate_limiter,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .field("password_config", &self.password_config)
            .finish_non_exhaustive()
    }
}

/// Builds the repository selected by `DATABASE_URL`.
///
/// `memory://` keeps users in process memory. Anything else is treated as a
/// PostgreSQL URL; pending migrations are applied before the pool is handed out.
pub async fn init_repository(database_url: &str) -> anyhow::Result<Arc<dyn UserRepository>> {
    if database_url.starts_with(MEMORY_URL_SCHEME) {
        warn!("Using in-memory user repository; data is lost on restart");
        return Ok(Arc::new(MemoryUserRepository::new()));
    }

    let pool = init_db_pool(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");

    Ok(Arc::new(PgUserRepository::new(pool)))
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let users = init_repository(&database_url).await?;

    Ok(AppState::new(
        users,
        JwtConfig::from_env(),
        PasswordConfig::from_env(),
        CorsConfig::from_env(),
        RateLimitConfig::from_env(),
    ))
}
