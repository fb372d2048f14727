//! Database migration command.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// Run storefront database migrations.
///
/// Migrations live in `crates/storefront/migrations/` and are embedded at
/// compile time.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration cannot be applied.
pub async fn storefront() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to storefront database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Storefront migrations complete!");
    Ok(())
}
