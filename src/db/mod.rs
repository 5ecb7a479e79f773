pub mod init;
pub mod price_queries;
pub mod stock_queries;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open the SQLite pool. The file is created on first run; `fetch_data`
/// populates it and the server only ever reads.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // A pool of one: every connection to "sqlite::memory:" is a separate
    // database, so the tests must not fan out.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init::ensure_schema(&pool).await.unwrap();
    pool
}
