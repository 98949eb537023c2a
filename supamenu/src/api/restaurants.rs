use web_common::RestaurantDto;

use super::ApiClient;
use crate::errors::ApiError;
use crate::transport::{ApiRequest, HttpTransport};

impl<T: HttpTransport> ApiClient<T> {
    /// `GET /restaurants/{id}`
    pub async fn restaurant(&self, id: &str) -> Result<RestaurantDto, ApiError> {
        let restaurant: RestaurantDto = self
            .execute(ApiRequest::get(format!("/restaurants/{}", id)), "Failed to fetch restaurant")
            .await?;
        if restaurant.id.is_empty() {
            return Err(ApiError::Decode("restaurant has no id".to_string()));
        }
        Ok(restaurant)
    }

    /// `DELETE /restaurants/{id}`
    pub async fn delete_restaurant(&self, id: &str) -> Result<(), ApiError> {
        self.execute_empty(
            ApiRequest::delete(format!("/restaurants/{}", id)),
            "Failed to delete restaurant",
        )
        .await
    }
}
