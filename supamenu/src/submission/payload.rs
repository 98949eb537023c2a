//! Create-restaurant payload, contract version 1.
//!
//! `POST /restaurants` as `multipart/form-data`:
//!
//! | part | content |
//! |---|---|
//! | `name`, `location`, `completeName`, `contactNumber` | text |
//! | `ownerName`, `ownerEmail`, `ownerPhone` | text |
//! | `restaurantType`, `cuisineType` | wire enum value, e.g. `COFFEE_SHOP` |
//! | `openingHours` | JSON text `{"from":"HH:MM","to":"HH:MM"}` |
//! | `images` (repeated) | file `restaurant-image-{i}.{ext}` |
//! | `menuItems[i][name|price|description|category|id]` | text |
//! | `menuItems[i][image]` | file `menu-item-{id}.{ext}` |
//!
//! Fields in `DraftEntity::extras` are never sent.

use serde_json::json;

use crate::draft::DraftEntity;
use crate::transport::FormBody;

pub const PAYLOAD_VERSION: u32 = 1;

pub const CREATE_RESTAURANT_PATH: &str = "/restaurants";

/// Builds the v1 multipart body from a draft snapshot.
pub fn create_restaurant_form(draft: &DraftEntity) -> FormBody {
    let mut form = FormBody::new();
    form.text("name", draft.name.trim())
        .text("location", draft.location.trim())
        .text("completeName", draft.complete_name.trim())
        .text("contactNumber", draft.contact_number.trim())
        .text("ownerName", draft.owner.name.trim())
        .text("ownerEmail", draft.owner.email.trim())
        .text("ownerPhone", draft.owner.phone.trim())
        .text(
            "restaurantType",
            draft.restaurant_type.map(|t| t.value()).unwrap_or_default(),
        )
        .text(
            "cuisineType",
            draft.cuisine_type.map(|c| c.value()).unwrap_or_default(),
        )
        .text(
            "openingHours",
            json!({ "from": draft.opening_hours.from, "to": draft.opening_hours.to }).to_string(),
        );

    for (index, image) in draft.images.iter().enumerate() {
        form.file(
            "images",
            format!("restaurant-image-{}.{}", index, image.extension()),
            image.content_type.clone(),
            image.bytes.clone(),
        );
    }

    for (index, item) in draft.menu_items.iter().enumerate() {
        let key = |attribute: &str| format!("menuItems[{}][{}]", index, attribute);
        form.text(key("name"), item.name.trim())
            .text(key("price"), item.price.trim())
            .text(key("description"), item.description.trim())
            .text(key("category"), item.category.value())
            .text(key("id"), item.id.clone());

        if let Some(image) = &item.image {
            form.file(
                key("image"),
                format!("menu-item-{}.{}", item.id, image.extension()),
                image.content_type.clone(),
                image.bytes.clone(),
            );
        }
    }

    form
}
