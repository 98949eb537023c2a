//! Dashboard DTOs (overview metrics and orders).

use serde::{Deserialize, Serialize};
use crate::{MenuItemDto, UserDto};

/// Headline numbers for the overview tab (`GET /dashboard/metrics`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub total_sales: f64,
}

/// Order lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Get the query-string value.
    pub fn value(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Served => "SERVED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Order row (`GET /orders`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(deserialize_with = "crate::restaurants::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub table_number: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub created_at: String,
    #[serde(default)]
    pub order_items: Vec<OrderItemDto>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub menu_item: MenuItemDto,
    pub quantity: u32,
}
