use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::{AppState, Repositories};
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo, postgres_form_question_repo::PostgresFormQuestionRepo,
    postgres_participant_repo::PostgresParticipantRepo, postgres_venue_repo::PostgresVenueRepo,
    postgres_match_repo::PostgresMatchRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_form_question_repo::SqliteFormQuestionRepo,
    sqlite_participant_repo::SqliteParticipantRepo, sqlite_venue_repo::SqliteVenueRepo,
    sqlite_match_repo::SqliteMatchRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let repos = if config.uses_postgres() {
        info!("Initializing PostgreSQL connection...");
        postgres_repositories(connect_postgres(&config.database_url).await?)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");
        sqlite_repositories(connect_sqlite(&config.database_url).await?)
    };

    Ok(AppState::new(repos))
}

pub async fn connect_postgres(database_url: &str) -> Result<PgPool, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(AppError::Database)?
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(opts)
        .await
        .map_err(AppError::Database)?;

    sqlx::migrate!("./migrations/postgres")
        .run(&pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run Postgres migrations: {}", e)))?;

    Ok(pool)
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(AppError::Database)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .map_err(AppError::Database)?;

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run SQLite migrations: {}", e)))?;

    Ok(pool)
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
        question_repo: Arc::new(SqliteFormQuestionRepo::new(pool.clone())),
        participant_repo: Arc::new(SqliteParticipantRepo::new(pool.clone())),
        venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
        match_repo: Arc::new(SqliteMatchRepo::new(pool)),
    }
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
        question_repo: Arc::new(PostgresFormQuestionRepo::new(pool.clone())),
        participant_repo: Arc::new(PostgresParticipantRepo::new(pool.clone())),
        venue_repo: Arc::new(PostgresVenueRepo::new(pool.clone())),
        match_repo: Arc::new(PostgresMatchRepo::new(pool)),
    }
}
