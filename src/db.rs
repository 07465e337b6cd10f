use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

use crate::error::AppResult;

const SQLITE_PRAGMAS: &[&str] = &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    opts.max_connections(max_connections.max(1)).sqlx_logging(false);
    if is_in_memory(database_url) {
        // Every connection to :memory: opens its own empty database.
        opts.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opts).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite && !is_in_memory(database_url) {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma.to_string())).await?;
        }
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("migrations applied");
    Ok(db)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
