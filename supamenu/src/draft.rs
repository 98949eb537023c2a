//! The in-progress restaurant record and the store that owns it.
//!
//! A [`DraftEntity`] is created empty when the wizard starts and is only ever
//! changed through [`FormStore::merge`]. Merging is shallow: any field present
//! in the [`DraftPatch`] replaces the current value wholesale, including the
//! owner record and the image/menu lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use web_common::{CuisineType, MenuCategory, OpeningHours, RestaurantType};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Form field keys. Error maps and server `details` use the same names.
pub mod fields {
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const COMPLETE_NAME: &str = "completeName";
    pub const CONTACT_NUMBER: &str = "contactNumber";
    pub const OWNER_NAME: &str = "ownerName";
    pub const OWNER_EMAIL: &str = "ownerEmail";
    pub const OWNER_PHONE: &str = "ownerPhone";
    pub const RESTAURANT_TYPE: &str = "restaurantType";
    pub const CUISINE_TYPE: &str = "cuisineType";
    pub const OPENING_FROM: &str = "openingHours.from";
    pub const OPENING_TO: &str = "openingHours.to";
    pub const IMAGES: &str = "images";
    pub const MENU_ITEMS: &str = "menuItems";

    /// Key of one attribute of the menu item at `index`, e.g. `menuItems[2].price`.
    pub fn menu_item(index: usize, attribute: &str) -> String {
        format!("{}[{}].{}", MENU_ITEMS, index, attribute)
    }
}

/// A file picked in the browser or read from disk, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File extension used when renaming the upload, `jpg` when there is none.
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => "jpg",
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `None` when the attachment is an acceptable image upload.
    pub fn upload_problem(&self) -> Option<&'static str> {
        if !self.is_image() {
            Some("File must be an image")
        } else if self.size() > MAX_IMAGE_BYTES {
            Some("Image must be under 5MB")
        } else {
            None
        }
    }
}

/// Owner contact details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OwnerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One dish being added to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMenuItem {
    pub id: String,
    pub name: String,
    /// Decimal price as typed.
    pub price: String,
    pub description: String,
    pub category: MenuCategory,
    #[serde(default)]
    pub image: Option<Attachment>,
}

impl DraftMenuItem {
    /// Creates an item with a fresh random id.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        category: MenuCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            price: price.into(),
            description: description.into(),
            category,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Attachment) -> Self {
        self.image = Some(image);
        self
    }
}

/// The restaurant being assembled across the wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftEntity {
    pub name: String,
    pub location: String,
    pub complete_name: String,
    pub contact_number: String,
    pub owner: OwnerDetails,
    pub restaurant_type: Option<RestaurantType>,
    pub cuisine_type: Option<CuisineType>,
    pub opening_hours: OpeningHours,
    pub images: Vec<Attachment>,
    pub menu_items: Vec<DraftMenuItem>,
    /// Fields the wizard does not model. Stored, never sent.
    pub extras: BTreeMap<String, String>,
}

impl Default for DraftEntity {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            complete_name: String::new(),
            contact_number: String::new(),
            owner: OwnerDetails::default(),
            restaurant_type: None,
            cuisine_type: None,
            opening_hours: OpeningHours::default(),
            images: Vec::new(),
            menu_items: Vec::new(),
            extras: BTreeMap::new(),
        }
    }
}

impl DraftEntity {
    /// Keys of every field whose value differs between `self` and `other`.
    ///
    /// Menu items are compared per index and attribute so that editing one
    /// item's price only reports `menuItems[i].price`. A change in list length
    /// also reports `menuItems`.
    pub fn changed_fields(&self, other: &DraftEntity) -> Vec<String> {
        let mut changed = Vec::new();
        let mut check = |key: &str, differs: bool| {
            if differs {
                changed.push(key.to_string());
            }
        };

        check(fields::NAME, self.name != other.name);
        check(fields::LOCATION, self.location != other.location);
        check(fields::COMPLETE_NAME, self.complete_name != other.complete_name);
        check(fields::CONTACT_NUMBER, self.contact_number != other.contact_number);
        check(fields::OWNER_NAME, self.owner.name != other.owner.name);
        check(fields::OWNER_EMAIL, self.owner.email != other.owner.email);
        check(fields::OWNER_PHONE, self.owner.phone != other.owner.phone);
        check(fields::RESTAURANT_TYPE, self.restaurant_type != other.restaurant_type);
        check(fields::CUISINE_TYPE, self.cuisine_type != other.cuisine_type);
        check(fields::OPENING_FROM, self.opening_hours.from != other.opening_hours.from);
        check(fields::OPENING_TO, self.opening_hours.to != other.opening_hours.to);
        check(fields::IMAGES, self.images != other.images);
        check(fields::MENU_ITEMS, self.menu_items.len() != other.menu_items.len());

        let longest = self.menu_items.len().max(other.menu_items.len());
        for index in 0..longest {
            match (self.menu_items.get(index), other.menu_items.get(index)) {
                (Some(a), Some(b)) => {
                    let attributes = [
                        ("id", a.id != b.id),
                        ("name", a.name != b.name),
                        ("price", a.price != b.price),
                        ("description", a.description != b.description),
                        ("category", a.category != b.category),
                        ("image", a.image != b.image),
                    ];
                    for (attribute, differs) in attributes {
                        if differs {
                            changed.push(fields::menu_item(index, attribute));
                        }
                    }
                }
                _ => {
                    for attribute in ["id", "name", "price", "description", "category", "image"] {
                        changed.push(fields::menu_item(index, attribute));
                    }
                }
            }
        }

        for key in self.extras.keys().chain(other.extras.keys()) {
            if self.extras.get(key) != other.extras.get(key) && !changed.contains(key) {
                changed.push(key.clone());
            }
        }

        changed
    }
}

/// A partial update. `None` leaves the field alone; `Some` replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub complete_name: Option<String>,
    pub contact_number: Option<String>,
    pub owner: Option<OwnerDetails>,
    pub restaurant_type: Option<RestaurantType>,
    pub cuisine_type: Option<CuisineType>,
    pub opening_hours: Option<OpeningHours>,
    pub images: Option<Vec<Attachment>>,
    pub menu_items: Option<Vec<DraftMenuItem>>,
    pub extras: BTreeMap<String, String>,
}

impl DraftPatch {
    /// Patch that stores a field the wizard does not model.
    pub fn extra(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut patch = Self::default();
        patch.extras.insert(key.into(), value.into());
        patch
    }
}

/// Sole owner of the draft for one wizard session.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    draft: DraftEntity,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: DraftEntity) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &DraftEntity {
        &self.draft
    }

    /// Copy of the current draft, e.g. for building a payload.
    pub fn snapshot(&self) -> DraftEntity {
        self.draft.clone()
    }

    /// Shallow-merges `patch` into the draft and returns the result.
    pub fn merge(&mut self, patch: DraftPatch) -> &DraftEntity {
        let draft = &mut self.draft;
        if let Some(name) = patch.name {
            draft.name = name;
        }
        if let Some(location) = patch.location {
            draft.location = location;
        }
        if let Some(complete_name) = patch.complete_name {
            draft.complete_name = complete_name;
        }
        if let Some(contact_number) = patch.contact_number {
            draft.contact_number = contact_number;
        }
        if let Some(owner) = patch.owner {
            draft.owner = owner;
        }
        if let Some(restaurant_type) = patch.restaurant_type {
            draft.restaurant_type = Some(restaurant_type);
        }
        if let Some(cuisine_type) = patch.cuisine_type {
            draft.cuisine_type = Some(cuisine_type);
        }
        if let Some(opening_hours) = patch.opening_hours {
            draft.opening_hours = opening_hours;
        }
        if let Some(images) = patch.images {
            draft.images = images;
        }
        if let Some(menu_items) = patch.menu_items {
            draft.menu_items = menu_items;
        }
        draft.extras.extend(patch.extras);
        &self.draft
    }

    /// Appends a menu item (replaces the whole list, as a merge would).
    pub fn add_menu_item(&mut self, item: DraftMenuItem) -> &DraftEntity {
        let mut menu_items = self.draft.menu_items.clone();
        menu_items.push(item);
        self.merge(DraftPatch {
            menu_items: Some(menu_items),
            ..Default::default()
        })
    }

    /// Removes the menu item with `id`. Returns false when no item matched.
    pub fn remove_menu_item(&mut self, id: &str) -> bool {
        let before = self.draft.menu_items.len();
        let menu_items: Vec<DraftMenuItem> = self
            .draft
            .menu_items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        let removed = menu_items.len() != before;
        if removed {
            self.merge(DraftPatch {
                menu_items: Some(menu_items),
                ..Default::default()
            });
        }
        removed
    }

    /// Discards the draft.
    pub fn clear(&mut self) {
        self.draft = DraftEntity::default();
    }
}
