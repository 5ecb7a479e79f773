use sqlx::SqlitePool;

use crate::models::Stock;

pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT ticker, name, sector, industry
         FROM stocks
         ORDER BY ticker ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stocks")
        .fetch_one(pool)
        .await
}

/// Insert or refresh constituents. Re-running ingestion updates the
/// name/sector/industry of tickers that already exist.
pub async fn upsert_many(pool: &SqlitePool, stocks: &[Stock]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for s in stocks {
        sqlx::query(
            "INSERT INTO stocks (ticker, name, sector, industry)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (ticker) DO UPDATE SET
                 name = excluded.name,
                 sector = excluded.sector,
                 industry = excluded.industry",
        )
        .bind(&s.ticker)
        .bind(&s.name)
        .bind(&s.sector)
        .bind(&s.industry)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
