use std::str::FromStr;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::errors::InventoryError;

/// Opens the SQLite pool with foreign keys enforced and applies the embedded migrations.
pub async fn init_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, InventoryError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
    // An in-memory database lives only as long as its connection.
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    let pool = pool_options.connect_with(options).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready at {}", database_url);

    Ok(pool)
}
