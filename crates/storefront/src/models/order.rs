//! Order domain types and their JSON projection.
//!
//! Monetary columns are `rust_decimal::Decimal` end to end in storage and in
//! the domain types; the JSON projection serializes them as numbers via
//! `rust_decimal::serde::float`, matching what API clients expect.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use driftline_core::{LineItemId, OrderId, OrderStatus, ProductId, UserId};

/// Image path served when a product has no media at all.
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.png";

/// An order (domain type), with its line items in display order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    /// Owning user; loaded orders always match the authenticated principal.
    pub user_id: UserId,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

/// A single order line (domain type).
#[derive(Debug, Clone)]
pub struct LineItem {
    pub id: LineItemId,
    pub quantity: i32,
    /// Unit price at purchase time, not the product's current price.
    pub unit_price: Decimal,
    pub product: Product,
}

/// Product snapshot carried by a line item.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Media file names in display order (position ascending).
    pub media: Vec<String>,
}

// =============================================================================
// JSON projection
// =============================================================================

/// JSON shape of an order as returned by `GET /api/orders/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub items: Vec<LineItemResponse>,
}

/// JSON shape of one order line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub id: LineItemId,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub product: ProductResponse,
}

/// JSON shape of a line item's product, with derived image fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Primary display image: first media asset, or the placeholder.
    pub image: String,
    /// Every media asset in order, rewritten under the public prefix.
    pub images: Vec<String>,
}

impl OrderResponse {
    /// Shape an order for the wire, rewriting media file names to public
    /// asset paths under `asset_base_path`.
    #[must_use]
    pub fn from_order(order: Order, asset_base_path: &str) -> Self {
        let items = order
            .items
            .into_iter()
            .map(|item| LineItemResponse {
                id: item.id,
                quantity: item.quantity,
                price: item.unit_price,
                product: ProductResponse::from_product(item.product, asset_base_path),
            })
            .collect();

        Self {
            id: order.id,
            status: order.status,
            created_at: order.created_at,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping: order.shipping,
            total: order.total,
            items,
        }
    }
}

impl ProductResponse {
    fn from_product(product: Product, asset_base_path: &str) -> Self {
        let images: Vec<String> = product
            .media
            .iter()
            .map(|file| asset_path(asset_base_path, file))
            .collect();

        let image = images
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            image,
            images,
        }
    }
}

/// Join a media file name onto the public asset prefix.
fn asset_path(base: &str, file: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{file}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_order(media: Vec<String>) -> Order {
        Order {
            id: OrderId::new("order-1"),
            user_id: UserId::new("u-1"),
            status: OrderStatus::Shipped,
            subtotal: Decimal::new(49_98, 2),
            tax: Decimal::new(4_00, 2),
            shipping: Decimal::new(5_00, 2),
            total: Decimal::new(58_98, 2),
            created_at: Utc::now(),
            items: vec![LineItem {
                id: LineItemId::new("li-1"),
                quantity: 2,
                unit_price: Decimal::new(24_99, 2),
                product: Product {
                    id: ProductId::new("p-1"),
                    name: "Canvas Tote".to_string(),
                    slug: "canvas-tote".to_string(),
                    media,
                },
            }],
        }
    }

    #[test]
    fn test_media_rewritten_under_asset_prefix() {
        let order = sample_order(vec!["tote-front.jpg".to_string(), "tote-back.jpg".to_string()]);
        let response = OrderResponse::from_order(order, "/assets/products");

        let product = &response.items[0].product;
        assert_eq!(product.image, "/assets/products/tote-front.jpg");
        assert_eq!(
            product.images,
            vec![
                "/assets/products/tote-front.jpg",
                "/assets/products/tote-back.jpg"
            ]
        );
    }

    #[test]
    fn test_placeholder_when_no_media() {
        let order = sample_order(vec![]);
        let response = OrderResponse::from_order(order, "/assets/products");

        let product = &response.items[0].product;
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_asset_path_handles_trailing_slash() {
        assert_eq!(asset_path("/assets/", "a.jpg"), "/assets/a.jpg");
        assert_eq!(asset_path("/assets", "a.jpg"), "/assets/a.jpg");
    }

    #[test]
    fn test_monetary_fields_serialize_as_numbers() {
        let order = sample_order(vec!["tote-front.jpg".to_string()]);
        let json = serde_json::to_value(OrderResponse::from_order(order, "/assets/products")).unwrap();

        assert!(json["total"].is_number());
        assert!(json["subtotal"].is_number());
        assert!((json["total"].as_f64().unwrap() - 58.98).abs() < 1e-9);
        assert!(json["items"][0]["price"].is_number());
        assert_eq!(json["items"][0]["quantity"], 2);
        // camelCase wire names
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
