//! Database connection management.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::{Config, Error, Result};

/// Create a SQLite connection pool, creating the database file on first run.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(Error::Database)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}

/// Create the bookings table if it does not exist yet.
///
/// Monetary columns are TEXT: the SQLite driver has no decimal mapping, so
/// amounts are stored as their canonical string form and re-parsed.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id TEXT PRIMARY KEY,
            reference TEXT NOT NULL UNIQUE,
            customer_phone TEXT,
            service TEXT NOT NULL,
            salon TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            stylist TEXT,
            service_price TEXT NOT NULL,
            booking_fee_amount TEXT NOT NULL,
            tax_amount TEXT NOT NULL,
            total_booking_fee TEXT NOT NULL,
            amount_payable_at_salon TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'confirmed',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
