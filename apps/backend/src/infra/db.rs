use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect to the database. Runs no migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date. The single entrypoint used
/// by state building.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;
    info!("database schema is up to date");
    Ok(conn)
}
