use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

/// Configure SQLite pragmas, set per-connection via after_connect.
async fn configure_sqlite_pragmas(conn: &mut sqlx::SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Executor;

    // WAL mode: concurrent reads during writes, much faster writes
    conn.execute("PRAGMA journal_mode = WAL").await?;

    // NORMAL synchronous: faster writes, still synced at critical moments
    conn.execute("PRAGMA synchronous = NORMAL").await?;

    // 5 second timeout for busy connections
    conn.execute("PRAGMA busy_timeout = 5000").await?;

    conn.execute("PRAGMA foreign_keys = ON").await?;

    Ok(())
}

/// On-disk database next to the binary unless DATABASE_URL says otherwise.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://recipes.db?mode=rwc".to_string())
}

pub async fn connect(db_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .after_connect(|conn, _meta| Box::pin(async move { configure_sqlite_pragmas(conn).await }))
        .connect(db_url)
        .await
        .context(format!("failed to connect to database at {db_url}"))?;

    // Run embedded migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    log::info!("[LOAD] Database ready at {}", db_url);

    Ok(pool)
}
