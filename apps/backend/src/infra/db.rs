use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, DbProfile};
use crate::error::AppError;

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind, profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // Every connection to `sqlite::memory:` is its own database.
    if kind == DbKind::SqliteMemory {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(16);
    }

    Ok(Database::connect(opts).await?)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind, profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(?kind, "database ready");
    Ok(conn)
}
