use web_common::{MenuCategory, MenuItemPage, MetricsDto, OrderDto, OrderStatus};

use super::ApiClient;
use crate::errors::ApiError;
use crate::transport::{ApiRequest, HttpTransport};

impl<T: HttpTransport> ApiClient<T> {
    /// `GET /dashboard/metrics`
    pub async fn metrics(&self) -> Result<MetricsDto, ApiError> {
        self.execute(ApiRequest::get("/dashboard/metrics"), "Failed to load metrics")
            .await
    }

    /// `GET /orders`, optionally filtered by status.
    pub async fn orders(&self, status: Option<OrderStatus>) -> Result<Vec<OrderDto>, ApiError> {
        let mut request = ApiRequest::get("/orders");
        if let Some(status) = status {
            request = request.query("status", status.value());
        }
        self.execute(request, "Failed to load orders").await
    }

    /// `GET /restaurants/{id}/menu-items`, one page of one category.
    pub async fn menu_items(
        &self,
        restaurant_id: &str,
        category: MenuCategory,
        page: u32,
        size: u32,
    ) -> Result<MenuItemPage, ApiError> {
        let request = ApiRequest::get(format!("/restaurants/{}/menu-items", restaurant_id))
            .query("category", category.value())
            .query("page", page.to_string())
            .query("size", size.to_string());
        self.execute(request, "Failed to load menu items").await
    }
}
