//! Demo-data generation.
//!
//! Generation is a reset: previous demo-prefixed rows are cleared in the
//! same transaction that inserts the fresh batch, so the newest demo
//! order's creation time doubles as the "last reset" timestamp reported by
//! the stats endpoint.
//!
//! Data generation is pure (counts + RNG in, rows out); only the insert
//! step touches the database.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use driftline_core::OrderStatus;

use crate::db::demo::{DEMO_ORDER_ID_PREFIX, DEMO_PRODUCT_ID_PREFIX, DEMO_USER_ID_PREFIX};

/// Password every demo account is created with.
const DEMO_PASSWORD: &str = "demo1234";

/// Flat shipping charge below the free-shipping threshold.
const SHIPPING_FLAT: Decimal = Decimal::from_parts(750, 0, 0, false, 2);
/// Subtotal at which shipping becomes free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Sales tax rate applied to subtotals.
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

const FIRST_NAMES: &[&str] = &["Avery", "Jordan", "Riley", "Morgan", "Casey", "Quinn", "Rowan"];
const LAST_NAMES: &[&str] = &["Reed", "Hayes", "Ellis", "Monroe", "Blake", "Sawyer", "Lane"];

const REVIEW_BODIES: &[&str] = &[
    "Exactly as described, would buy again.",
    "Good quality for the price.",
    "Shipping took a while but the product is great.",
    "Not quite what I expected, still decent.",
    "Five stars, already ordered a second one.",
];

struct CatalogEntry {
    name: &'static str,
    slug: &'static str,
    price_cents: i64,
    media: &'static [&'static str],
}

/// Fixed demo catalog. Products are upserted by id so repeated generation
/// keeps referencing the same rows.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Canvas Tote",
        slug: "canvas-tote",
        price_cents: 24_99,
        media: &["canvas-tote-front.jpg", "canvas-tote-back.jpg"],
    },
    CatalogEntry {
        name: "Enamel Mug",
        slug: "enamel-mug",
        price_cents: 14_50,
        media: &["enamel-mug.jpg"],
    },
    CatalogEntry {
        name: "Linen Throw",
        slug: "linen-throw",
        price_cents: 64_00,
        media: &["linen-throw-folded.jpg", "linen-throw-draped.jpg", "linen-throw-detail.jpg"],
    },
    CatalogEntry {
        name: "Beeswax Candle",
        slug: "beeswax-candle",
        price_cents: 18_00,
        media: &["beeswax-candle.jpg"],
    },
    CatalogEntry {
        name: "Field Notebook",
        slug: "field-notebook",
        price_cents: 9_75,
        media: &[],
    },
    CatalogEntry {
        name: "Cedar Soap Dish",
        slug: "cedar-soap-dish",
        price_cents: 12_25,
        media: &["cedar-soap-dish.jpg"],
    },
];

/// Options accepted by `POST /api/demo/generate`.
///
/// Missing fields fall back to the documented defaults; `includeAdmin`
/// stays on unless the request explicitly turns it off.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoSeedOptions {
    pub user_count: u32,
    pub order_count: u32,
    pub review_count: u32,
    pub include_admin: bool,
}

impl Default for DemoSeedOptions {
    fn default() -> Self {
        Self {
            user_count: 3,
            order_count: 5,
            review_count: 8,
            include_admin: true,
        }
    }
}

/// What a generation run actually wrote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSeedSummary {
    pub users_created: u32,
    pub orders_created: u32,
    pub reviews_created: u32,
    pub admin_created: bool,
}

/// Errors that can occur while seeding demo data.
#[derive(Debug, Error)]
pub enum DemoSeedError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

// =============================================================================
// Generated rows (pure data, no I/O)
// =============================================================================

#[derive(Debug, Clone)]
pub struct DemoUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct DemoOrder {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub items: Vec<DemoLineItem>,
}

#[derive(Debug, Clone)]
pub struct DemoLineItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct DemoReview {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub rating: i32,
    pub body: String,
}

/// Generate `count` demo users with prefixed ids and emails.
pub fn generate_users(count: u32) -> Vec<DemoUser> {
    (1..=count)
        .map(|n| {
            let idx = (n as usize - 1) % FIRST_NAMES.len();
            DemoUser {
                id: format!("{DEMO_USER_ID_PREFIX}{n}"),
                email: format!("demo-user-{n}@driftline.shop"),
                first_name: (*FIRST_NAMES.get(idx).unwrap_or(&"Avery")).to_string(),
                last_name: (*LAST_NAMES.get(idx).unwrap_or(&"Reed")).to_string(),
            }
        })
        .collect()
}

/// Generate `count` demo orders spread across `users`, with 1-3 line items
/// each and decimal money math matching checkout rules.
pub fn generate_orders(count: u32, users: &[DemoUser], rng: &mut impl Rng) -> Vec<DemoOrder> {
    if users.is_empty() {
        return Vec::new();
    }

    (1..=count)
        .map(|n| {
            let user = &users[rng.random_range(0..users.len())];
            let order_id = format!("{DEMO_ORDER_ID_PREFIX}{n}");

            let item_count = rng.random_range(1..=CATALOG.len().min(3));
            let mut picks: Vec<usize> = (0..CATALOG.len()).collect();
            let mut items = Vec::with_capacity(item_count);
            let mut subtotal = Decimal::ZERO;

            for position in 0..item_count {
                let pick = picks.swap_remove(rng.random_range(0..picks.len()));
                let entry = &CATALOG[pick];
                let quantity = rng.random_range(1..=3);
                let unit_price = Decimal::new(entry.price_cents, 2);
                subtotal += unit_price * Decimal::from(quantity);

                items.push(DemoLineItem {
                    id: format!("demo-item-{n}-{position}"),
                    product_id: format!("{DEMO_PRODUCT_ID_PREFIX}{}", pick + 1),
                    quantity,
                    unit_price,
                    position: i32::try_from(position).unwrap_or(i32::MAX),
                });
            }

            let tax = (subtotal * TAX_RATE).round_dp(2);
            let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
                Decimal::ZERO
            } else {
                SHIPPING_FLAT
            };
            let total = subtotal + tax + shipping;

            DemoOrder {
                id: order_id,
                user_id: user.id.clone(),
                status: OrderStatus::ALL[rng.random_range(0..OrderStatus::ALL.len())],
                subtotal,
                tax,
                shipping,
                total,
                items,
            }
        })
        .collect()
}

/// Generate `count` demo reviews from `users` against the fixed catalog.
pub fn generate_reviews(count: u32, users: &[DemoUser], rng: &mut impl Rng) -> Vec<DemoReview> {
    if users.is_empty() {
        return Vec::new();
    }

    (1..=count)
        .map(|n| DemoReview {
            id: format!("demo-review-{n}"),
            user_id: users[rng.random_range(0..users.len())].id.clone(),
            product_id: format!(
                "{DEMO_PRODUCT_ID_PREFIX}{}",
                rng.random_range(1..=CATALOG.len())
            ),
            rating: rng.random_range(1..=5),
            body: REVIEW_BODIES[rng.random_range(0..REVIEW_BODIES.len())].to_string(),
        })
        .collect()
}

// =============================================================================
// Seeder
// =============================================================================

/// Seeds demo data into the storefront database.
pub struct DemoSeeder<'a> {
    pool: &'a PgPool,
    admin_email: &'a str,
}

impl<'a> DemoSeeder<'a> {
    /// Create a new demo seeder.
    #[must_use]
    pub const fn new(pool: &'a PgPool, admin_email: &'a str) -> Self {
        Self { pool, admin_email }
    }

    /// Replace all demo data with a freshly generated batch.
    ///
    /// Runs in a single transaction: clears previous demo rows, upserts the
    /// catalog, then inserts users, orders, and reviews.
    ///
    /// # Errors
    ///
    /// Returns `DemoSeedError` if hashing or any database step fails; the
    /// transaction rolls back and prior demo data survives.
    pub async fn seed(&self, options: &DemoSeedOptions) -> Result<DemoSeedSummary, DemoSeedError> {
        let users = generate_users(options.user_count);
        // Confine the `!Send` `ThreadRng` to a block so it is dropped before
        // the first `.await`, keeping the resulting future `Send` (required by
        // axum's `Handler`).
        let (orders, reviews) = {
            let mut rng = rand::rng();
            let orders = generate_orders(options.order_count, &users, &mut rng);
            let reviews = generate_reviews(options.review_count, &users, &mut rng);
            (orders, reviews)
        };

        let password_hash = hash_demo_password()?;

        let mut tx = self.pool.begin().await?;

        // Clear previous demo rows; order matters for foreign keys.
        sqlx::query(r"DELETE FROM reviews WHERE user_id LIKE $1")
            .bind(format!("{DEMO_USER_ID_PREFIX}%"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(r"DELETE FROM order_line_items WHERE order_id LIKE $1")
            .bind(format!("{DEMO_ORDER_ID_PREFIX}%"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(r"DELETE FROM orders WHERE id LIKE $1")
            .bind(format!("{DEMO_ORDER_ID_PREFIX}%"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(r"DELETE FROM users WHERE id LIKE $1")
            .bind(format!("{DEMO_USER_ID_PREFIX}%"))
            .execute(&mut *tx)
            .await?;

        // Catalog upsert: stable ids, so conflicts are no-ops.
        for (idx, entry) in CATALOG.iter().enumerate() {
            let product_id = format!("{DEMO_PRODUCT_ID_PREFIX}{}", idx + 1);
            sqlx::query(
                r"
                INSERT INTO products (id, name, slug, price)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                ",
            )
            .bind(&product_id)
            .bind(entry.name)
            .bind(entry.slug)
            .bind(Decimal::new(entry.price_cents, 2))
            .execute(&mut *tx)
            .await?;

            for (position, file) in entry.media.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO product_media (product_id, file_name, position)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (product_id, position) DO NOTHING
                    ",
                )
                .bind(&product_id)
                .bind(*file)
                .bind(i32::try_from(position).unwrap_or(i32::MAX))
                .execute(&mut *tx)
                .await?;
            }
        }

        for user in &users {
            sqlx::query(
                r"
                INSERT INTO users (id, email, first_name, last_name, password_hash)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await?;
        }

        let mut admin_created = false;
        if options.include_admin {
            let result = sqlx::query(
                r"
                INSERT INTO users (id, email, first_name, last_name, password_hash)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (email) DO NOTHING
                ",
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(self.admin_email)
            .bind("Store")
            .bind("Admin")
            .bind(&password_hash)
            .execute(&mut *tx)
            .await?;
            admin_created = result.rows_affected() > 0;
        }

        for order in &orders {
            sqlx::query(
                r"
                INSERT INTO orders (id, user_id, status, subtotal, tax, shipping, total)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(&order.id)
            .bind(&order.user_id)
            .bind(order.status.to_string())
            .bind(order.subtotal)
            .bind(order.tax)
            .bind(order.shipping)
            .bind(order.total)
            .execute(&mut *tx)
            .await?;

            for item in &order.items {
                sqlx::query(
                    r"
                    INSERT INTO order_line_items (id, order_id, product_id, quantity, unit_price, position)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ",
                )
                .bind(&item.id)
                .bind(&order.id)
                .bind(&item.product_id)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.position)
                .execute(&mut *tx)
                .await?;
            }
        }

        for review in &reviews {
            sqlx::query(
                r"
                INSERT INTO reviews (id, user_id, product_id, rating, body)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&review.id)
            .bind(&review.user_id)
            .bind(&review.product_id)
            .bind(review.rating)
            .bind(&review.body)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(DemoSeedSummary {
            users_created: u32::try_from(users.len()).unwrap_or(u32::MAX),
            orders_created: u32::try_from(orders.len()).unwrap_or(u32::MAX),
            reviews_created: u32::try_from(reviews.len()).unwrap_or(u32::MAX),
            admin_created,
        })
    }
}

/// Hash the shared demo password with argon2.
fn hash_demo_password() -> Result<String, DemoSeedError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| DemoSeedError::PasswordHash)
}
