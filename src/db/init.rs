use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stocks (
        ticker   TEXT PRIMARY KEY,
        name     TEXT NOT NULL,
        sector   TEXT,
        industry TEXT
    )",
    "CREATE TABLE IF NOT EXISTS daily_prices (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker TEXT NOT NULL,
        date   TEXT NOT NULL,
        open   REAL,
        high   REAL,
        low    REAL,
        close  REAL NOT NULL,
        volume INTEGER,
        UNIQUE (ticker, date)
    )",
    "CREATE INDEX IF NOT EXISTS idx_daily_prices_ticker ON daily_prices (ticker)",
    "CREATE INDEX IF NOT EXISTS idx_daily_prices_date ON daily_prices (date)",
];

/// Create tables and indexes if missing. Safe to run on every startup.
///
/// Dates are stored as ISO-8601 text, so lexicographic comparison in SQL
/// matches chronological order.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ensured");
    Ok(())
}
