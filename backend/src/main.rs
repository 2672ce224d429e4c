//! Rounds entry-point: loads settings, migrates the schema, and serves pages.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rounds::inbound::http::health::HealthState;
use rounds::outbound::persistence::{DbPool, PoolConfig};
use rounds::settings::{BuildMode, Settings};
use server::{ServerConfig, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations on a blocking thread.
async fn run_migrations(database_url: String) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut conn = PgConnection::establish(&database_url)
            .wrap_err("connect for migrations")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| eyre!("run migrations: {err}"))?;
        info!(count = applied.len(), "migrations applied");
        Ok(())
    })
    .await
    .wrap_err("migration task panicked")?
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).wrap_err("read .env");
        }
    }
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(std::env::args_os()).wrap_err("load settings")?;
    let database_url = settings.database_url(&DefaultEnv::new())?;
    let bind_addr = settings.bind_addr()?;
    let key = settings.session_key(BuildMode::from_debug_assertions())?;

    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
    )
    .await
    .wrap_err("build connection pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure(), bind_addr, pool)
        .with_org_id(settings.org_id);
    let server = create_server(health_state, config).wrap_err("start server")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server stopped")
}
