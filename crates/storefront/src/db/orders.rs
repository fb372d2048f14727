//! Order repository for database operations.
//!
//! The single read path is ownership-scoped: the order id and the owning
//! user id are matched in one compound filter, so "not found" and "not
//! yours" are the same outcome by construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use driftline_core::{LineItemId, OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{LineItem, Order, Product};

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    status: String,
    subtotal: Decimal,
    tax: Decimal,
    shipping: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct LineItemRow {
    id: String,
    quantity: i32,
    unit_price: Decimal,
    product_id: String,
    product_name: String,
    product_slug: String,
}

#[derive(Debug, FromRow)]
struct MediaRow {
    product_id: String,
    file_name: String,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one order scoped to its owner, with line items, product
    /// snapshots, and ordered media.
    ///
    /// Returns `None` when no order matches both the id and the owner —
    /// callers cannot tell a wrong id from someone else's order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn get_for_user(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r"
            SELECT id, user_id, status, subtotal, tax, shipping, total, created_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(order_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = row else {
            return Ok(None);
        };

        let items = self.load_items(order_id).await?;

        let status: OrderStatus = order.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Some(Order {
            id: OrderId::new(order.id),
            user_id: UserId::new(order.user_id),
            status,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping: order.shipping,
            total: order.total,
            created_at: order.created_at,
            items,
        }))
    }

    /// Load line items (position order) with product snapshots and media.
    async fn load_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, RepositoryError> {
        let item_rows: Vec<LineItemRow> = sqlx::query_as(
            r"
            SELECT li.id, li.quantity, li.unit_price,
                   p.id AS product_id, p.name AS product_name, p.slug AS product_slug
            FROM order_line_items li
            JOIN products p ON p.id = li.product_id
            WHERE li.order_id = $1
            ORDER BY li.position ASC
            ",
        )
        .bind(order_id.as_str())
        .fetch_all(self.pool)
        .await?;

        if item_rows.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<String> = item_rows
            .iter()
            .map(|r| r.product_id.clone())
            .collect();

        let media_rows: Vec<MediaRow> = sqlx::query_as(
            r"
            SELECT product_id, file_name
            FROM product_media
            WHERE product_id = ANY($1)
            ORDER BY product_id, position ASC
            ",
        )
        .bind(&product_ids)
        .fetch_all(self.pool)
        .await?;

        let mut media_by_product: HashMap<String, Vec<String>> = HashMap::new();
        for m in media_rows {
            media_by_product
                .entry(m.product_id)
                .or_default()
                .push(m.file_name);
        }

        let items = item_rows
            .into_iter()
            .map(|r| {
                let media = media_by_product
                    .get(&r.product_id)
                    .cloned()
                    .unwrap_or_default();

                LineItem {
                    id: LineItemId::new(r.id),
                    quantity: r.quantity,
                    unit_price: r.unit_price,
                    product: Product {
                        id: ProductId::new(r.product_id),
                        name: r.product_name,
                        slug: r.product_slug,
                        media,
                    },
                }
            })
            .collect();

        Ok(items)
    }
}
