mod config;
mod http;

use std::{net::IpAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{EmployeeService, seed::seed_demo};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee directory service")]
struct Cli {
    /// Tracing filter directive, overrides RUST_LOG.
    #[arg(long, global = true)]
    log: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees, skipping existing emails.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
    /// List applied and pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, help = "Bind address [env: BIND_HOST, default 0.0.0.0]")]
    host: Option<IpAddr>,
    #[arg(long, help = "Bind port [env: BIND_PORT, default 8080]")]
    port: Option<u16>,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl ServeCommand {
    fn serve_config(&self, config: &AppConfig) -> ServeConfig {
        ServeConfig::new(
            self.host.unwrap_or(config.host),
            self.port.unwrap_or(config.port),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(ObsConfig::from_env()?.with_filter(cli.log.clone()))?;
    let app_config = Arc::new(AppConfig::load()?);
    let outcome = match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
            MigrateCommand::Status => migrate_status().await,
        },
        Command::Seed => run_seed().await,
    };
    shutdown_tracing();
    outcome
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env()?;
    connect(&settings)
        .await
        .context("failed to connect to the database")
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let employees = EmployeeService::from_connection(pool.clone());
    if config.seed_on_start {
        seed_demo(&employees).await?;
    }
    let serve_config = cmd.serve_config(&config);
    let state = AppState {
        pool,
        employees,
        config,
    };
    http::serve(serve_config, state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "{} pending migration(s) detected; run `employee-server migrate up` or pass --allow-dirty",
            pending.len()
        );
    }
    Ok(())
}

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, false).await?;
    let report = seed_demo(&EmployeeService::from_connection(pool)).await?;
    info!(created = report.created, skipped = report.skipped, "seed finished");
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn migrate_status() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::status(&pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from(["employee-server", "serve", "--port", "9090"]).unwrap();
        let Command::Serve(cmd) = cli.command else {
            panic!("expected serve");
        };
        let config = AppConfig::default();
        let serve = cmd.serve_config(&config);
        assert_eq!(format!("{serve:?}"), "ServeConfig { addr: 0.0.0.0:9090 }");
    }

    #[test]
    fn migrate_takes_a_subcommand() {
        let cli = Cli::try_parse_from(["employee-server", "migrate", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate(MigrateCommand::Status)));
    }
}
