//! Demo-data queries backing the demo stats endpoint.
//!
//! Demo rows are recognized purely by prefix: demo users by their email,
//! demo orders and demo reviews by prefixed ids. Nothing else marks a row
//! as synthetic.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;

/// Prefix on every demo user's email address.
pub const DEMO_EMAIL_PREFIX: &str = "demo-";
/// Prefix on every demo user's id.
pub const DEMO_USER_ID_PREFIX: &str = "demo-user-";
/// Prefix on every demo order's id.
pub const DEMO_ORDER_ID_PREFIX: &str = "demo-order-";
/// Prefix on every demo product's id.
pub const DEMO_PRODUCT_ID_PREFIX: &str = "demo-product-";

/// Counts of demo rows plus the time of the most recent generation.
#[derive(Debug, Clone)]
pub struct DemoStats {
    pub user_count: i64,
    pub order_count: i64,
    pub review_count: i64,
    /// Creation time of the newest demo order; `None` when no demo orders
    /// exist. Generation replaces demo rows wholesale, so this is the last
    /// reset time.
    pub last_reset: Option<DateTime<Utc>>,
}

/// Repository for demo-data statistics.
pub struct DemoRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DemoRepository<'a> {
    /// Create a new demo repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count demo rows and find the last reset time.
    ///
    /// The user count filters on the demo email prefix AND excludes the
    /// admin address, even though the admin address carries no demo prefix.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn stats(&self, admin_email: &str) -> Result<DemoStats, RepositoryError> {
        let user_count: i64 = sqlx::query_scalar(
            r"SELECT COUNT(*) FROM users WHERE email LIKE $1 AND email <> $2",
        )
        .bind(format!("{DEMO_EMAIL_PREFIX}%"))
        .bind(admin_email)
        .fetch_one(self.pool)
        .await?;

        let order_count: i64 =
            sqlx::query_scalar(r"SELECT COUNT(*) FROM orders WHERE id LIKE $1")
                .bind(format!("{DEMO_ORDER_ID_PREFIX}%"))
                .fetch_one(self.pool)
                .await?;

        let review_count: i64 =
            sqlx::query_scalar(r"SELECT COUNT(*) FROM reviews WHERE user_id LIKE $1")
                .bind(format!("{DEMO_USER_ID_PREFIX}%"))
                .fetch_one(self.pool)
                .await?;

        let last_reset: Option<DateTime<Utc>> =
            sqlx::query_scalar(r"SELECT MAX(created_at) FROM orders WHERE id LIKE $1")
                .bind(format!("{DEMO_ORDER_ID_PREFIX}%"))
                .fetch_one(self.pool)
                .await?;

        Ok(DemoStats {
            user_count,
            order_count,
            review_count,
            last_reset,
        })
    }
}
