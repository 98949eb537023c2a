//! Draft files: the wizard's fields as camelCase JSON, with images given as
//! paths relative to the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use supamenu::{Attachment, DraftEntity, DraftMenuItem, OwnerDetails};
use web_common::{CuisineType, MenuCategory, OpeningHours, RestaurantType};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftFile {
    pub name: String,
    pub location: String,
    pub complete_name: String,
    pub contact_number: String,
    pub owner: OwnerDetails,
    pub restaurant_type: Option<RestaurantType>,
    pub cuisine_type: Option<CuisineType>,
    pub opening_hours: Option<OpeningHours>,
    pub images: Vec<PathBuf>,
    pub menu_items: Vec<MenuItemFile>,
    pub extras: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "price_text")]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: MenuCategory,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Prices may be written as `3500` or `"3500"`.
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid price: {}", other))),
    }
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn read_attachment(base: &Path, relative: &Path) -> Result<Attachment> {
    let path = base.join(relative);
    let bytes = std::fs::read(&path).with_context(|| format!("reading image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(Attachment::new(file_name, content_type(&path), bytes))
}

impl DraftFile {
    /// Resolves image paths against `base` and builds the draft.
    pub fn into_draft(self, base: &Path) -> Result<DraftEntity> {
        let images = self
            .images
            .iter()
            .map(|p| read_attachment(base, p))
            .collect::<Result<Vec<_>>>()?;

        let mut menu_items = Vec::with_capacity(self.menu_items.len());
        for item in self.menu_items {
            let mut entry = DraftMenuItem::new(item.name, item.price, item.description, item.category);
            if let Some(id) = item.id {
                entry.id = id;
            }
            if let Some(image) = &item.image {
                entry = entry.with_image(read_attachment(base, image)?);
            }
            menu_items.push(entry);
        }

        Ok(DraftEntity {
            name: self.name,
            location: self.location,
            complete_name: self.complete_name,
            contact_number: self.contact_number,
            owner: self.owner,
            restaurant_type: self.restaurant_type,
            cuisine_type: self.cuisine_type,
            opening_hours: self.opening_hours.unwrap_or_default(),
            images,
            menu_items,
            extras: self.extras,
        })
    }
}

pub fn load(path: &Path) -> Result<DraftEntity> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading draft {}", path.display()))?;
    let file: DraftFile =
        serde_json::from_str(&text).with_context(|| format!("parsing draft {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    file.into_draft(base)
}
