//! Demo data commands.
//!
//! These drive the same seeder and stats queries as the `/api/demo`
//! endpoints, but without the demo-mode gate: an operator running the CLI
//! against a database is already trusted.

use tracing::info;

use driftline_storefront::db::{self, DemoRepository};
use driftline_storefront::services::{DemoSeedOptions, DemoSeeder};

fn admin_email() -> String {
    std::env::var("DEMO_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string())
}

/// Replace demo data with a freshly generated batch.
///
/// # Errors
///
/// Returns an error if environment variables are missing or seeding fails.
pub async fn seed(
    users: u32,
    orders: u32,
    reviews: u32,
    include_admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let admin_email = admin_email();

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let options = DemoSeedOptions {
        user_count: users,
        order_count: orders,
        review_count: reviews,
        include_admin,
    };

    info!(
        users = options.user_count,
        orders = options.order_count,
        reviews = options.review_count,
        include_admin = options.include_admin,
        "Seeding demo data"
    );
    let summary = DemoSeeder::new(&pool, &admin_email).seed(&options).await?;

    info!("Seeding complete!");
    info!("  Users created: {}", summary.users_created);
    info!("  Orders created: {}", summary.orders_created);
    info!("  Reviews created: {}", summary.reviews_created);
    info!("  Admin created: {}", summary.admin_created);

    Ok(())
}

/// Show statistics about existing demo data.
///
/// # Errors
///
/// Returns an error if database connection or a query fails.
pub async fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let admin_email = admin_email();

    let pool = db::create_pool(&database_url).await?;

    let stats = DemoRepository::new(&pool).stats(&admin_email).await?;

    info!("Demo Data Statistics");
    info!("====================");
    info!("Demo users: {}", stats.user_count);
    info!("Demo orders: {}", stats.order_count);
    info!("Demo reviews: {}", stats.review_count);
    match stats.last_reset {
        Some(ts) => info!("Last reset: {ts}"),
        None => info!("Last reset: never"),
    }

    Ok(())
}
