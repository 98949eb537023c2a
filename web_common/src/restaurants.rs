//! Restaurant and menu DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use crate::{CuisineType, MenuCategory, RestaurantType};

/// Daily opening window, as `HH:MM` strings. `to` may be earlier than `from`
/// for venues that close after midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub from: String,
    pub to: String,
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            from: "14:00".to_string(),
            to: "02:00".to_string(),
        }
    }
}

/// Restaurant as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
    /// Server-assigned id. Empty when the backend omitted it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub complete_name: String,
    pub contact_number: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub restaurant_type: RestaurantType,
    pub cuisine_type: CuisineType,
    #[serde(default)]
    pub opening_hours: OpeningHours,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub menu_items: Vec<MenuItemDto>,
}

/// Menu item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Decimal price, kept as text to avoid float drift.
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default)]
    pub description: String,
    pub category: MenuCategory,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Image URL.
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

fn default_available() -> bool {
    true
}

/// One page of menu items (`GET /restaurants/{id}/menu-items`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPage {
    #[serde(default)]
    pub content: Vec<MenuItemDto>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
}

/// Accepts `"12.50"`, `12.5` or `12` and yields the textual form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
