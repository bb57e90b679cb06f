//! Fixtures shared by the integration suites.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool};
use products_hr::NewEmployee;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, Statement};
use url::Url;
use uuid::Uuid;

/// Fresh in-memory SQLite database with every migration applied. Pinned to
/// one connection: each SQLite memory connection is its own database.
pub async fn sqlite_pool() -> Result<DbPool> {
    let mut settings = DatabaseSettings::with_url("sqlite::memory:");
    settings.max_connections = 1;
    let pool = platform_db::connect(&settings).await?;
    Migrator::up(&pool, None).await?;
    Ok(pool)
}

pub fn ritesh() -> NewEmployee {
    NewEmployee::new("Ritesh", "Singh", "riteshsingh893@gmail.com")
}

pub fn deep() -> NewEmployee {
    NewEmployee::new("Deep", "Singh", "deep.singh@gmail.com")
}

/// Throw-away Postgres database derived from `TEST_DATABASE_URL`.
pub struct PgTestContext {
    pub pool: DbPool,
    admin_url: String,
    db_name: String,
}

impl PgTestContext {
    /// `None` when `TEST_DATABASE_URL` is unset, so callers can skip.
    pub async fn new() -> Result<Option<Self>> {
        let Ok(base) = std::env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };
        let (admin_url, db_name, test_url) = build_urls(&base)?;
        let admin = Database::connect(&admin_url).await?;
        admin
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                format!("CREATE DATABASE \"{db_name}\";"),
            ))
            .await
            .with_context(|| format!("failed to create {db_name}"))?;
        let pool = Database::connect(&test_url).await?;
        Migrator::up(&pool, None).await?;
        Ok(Some(Self {
            pool,
            admin_url,
            db_name,
        }))
    }

    pub async fn cleanup(self) {
        let Self {
            pool,
            admin_url,
            db_name,
        } = self;
        let _ = pool.close().await;
        if let Ok(admin) = Database::connect(&admin_url).await {
            let drop_sql = format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE);");
            let _ = admin
                .execute(Statement::from_string(DatabaseBackend::Postgres, drop_sql))
                .await;
        }
    }
}

fn build_urls(base: &str) -> Result<(String, String, String)> {
    let url = Url::parse(base).context("TEST_DATABASE_URL is not a valid URL")?;
    let db_path = url.path().trim_start_matches('/').to_string();
    let base_name = if db_path.is_empty() {
        "employee_test".to_string()
    } else {
        db_path
    };
    let db_name = format!("{}_{}", base_name, Uuid::new_v4().simple());
    let mut admin_url = url.clone();
    admin_url.set_path("/postgres");
    let mut test_url = url;
    test_url.set_path(&format!("/{db_name}"));
    Ok((admin_url.to_string(), db_name, test_url.to_string()))
}
