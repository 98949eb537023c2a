//! Per-step validation of the draft.
//!
//! Validation is scoped to one step: the fields of later steps are never
//! looked at while an earlier step is shown.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use crate::draft::{fields, DraftEntity};

/// Field key → message.
pub type FieldErrors = BTreeMap<String, String>;

/// `local@domain.tld`, no whitespace.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Rwandan mobile number: `+250` or `0`, then 7, 8 or 9 and eight digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+250|0)[789]\d{8}$").expect("phone pattern compiles")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepId {
    Profile,
    TypeAndTiming,
    Menu,
}

impl StepId {
    pub const ALL: [StepId; 3] = [StepId::Profile, StepId::TypeAndTiming, StepId::Menu];
    pub const FIRST: StepId = StepId::Profile;
    pub const LAST: StepId = StepId::Menu;

    /// 1-based position.
    pub fn number(&self) -> usize {
        match self {
            StepId::Profile => 1,
            StepId::TypeAndTiming => 2,
            StepId::Menu => 3,
        }
    }

    pub fn from_number(number: usize) -> Option<StepId> {
        StepId::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn key(&self) -> &'static str {
        match self {
            StepId::Profile => "profile",
            StepId::TypeAndTiming => "type-and-timing",
            StepId::Menu => "menu",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepId::Profile => "Restaurant Information",
            StepId::TypeAndTiming => "Restaurant Type & Timings",
            StepId::Menu => "Create your menu",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StepId::Profile => "Restaurant name, address, details, owner details",
            StepId::TypeAndTiming => "Establishment & cuisine type, opening hours",
            StepId::Menu => "Menu, restaurant, food images",
        }
    }

    pub fn next(&self) -> Option<StepId> {
        StepId::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<StepId> {
        StepId::from_number(self.number() - 1)
    }

    /// Step whose form shows `field`. Keys no step knows about belong to the last step.
    pub fn owning(field: &str) -> StepId {
        StepId::of_form_field(field).unwrap_or(StepId::LAST)
    }

    /// Step showing `field`, or `None` when the key names no form input.
    pub fn of_form_field(field: &str) -> Option<StepId> {
        let root = field
            .split(|c| c == '.' || c == '[')
            .next()
            .unwrap_or(field);
        match root {
            fields::NAME
            | fields::LOCATION
            | fields::COMPLETE_NAME
            | fields::CONTACT_NUMBER
            | fields::OWNER_NAME
            | fields::OWNER_EMAIL
            | fields::OWNER_PHONE => Some(StepId::Profile),
            fields::RESTAURANT_TYPE | fields::CUISINE_TYPE | "openingHours" | fields::IMAGES => {
                Some(StepId::TypeAndTiming)
            }
            fields::MENU_ITEMS => Some(StepId::Menu),
            _ => None,
        }
    }

    pub fn owns(&self, field: &str) -> bool {
        StepId::owning(field) == *self
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepId::ALL
            .into_iter()
            .find(|step| step.key() == s)
            .ok_or_else(|| format!("Unknown step: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(FieldErrors),
}

impl ValidationResult {
    fn from_errors(errors: FieldErrors) -> Self {
        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }
}

/// Checks the fields shown on `step`.
pub fn validate(step: StepId, draft: &DraftEntity) -> ValidationResult {
    let mut errors = FieldErrors::new();
    match step {
        StepId::Profile => validate_profile(draft, &mut errors),
        StepId::TypeAndTiming => validate_type_and_timing(draft, &mut errors),
        StepId::Menu => validate_menu(draft, &mut errors),
    }
    ValidationResult::from_errors(errors)
}

fn fail(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.insert(field.to_string(), message.to_string());
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn validate_profile(draft: &DraftEntity, errors: &mut FieldErrors) {
    if draft.name.trim().is_empty() {
        fail(errors, fields::NAME, "Restaurant name is required");
    }

    if draft.location.trim().is_empty() {
        fail(errors, fields::LOCATION, "Restaurant location is required");
    } else if !(5..=20).contains(&char_len(&draft.location)) {
        fail(errors, fields::LOCATION, "Location must be between 5 and 20 characters");
    }

    if draft.contact_number.trim().is_empty() {
        fail(errors, fields::CONTACT_NUMBER, "Contact number is required");
    } else if !is_valid_phone(&draft.contact_number) {
        fail(errors, fields::CONTACT_NUMBER, "Please enter a valid mobile number");
    }

    let owner = &draft.owner;
    if owner.name.trim().is_empty() {
        fail(errors, fields::OWNER_NAME, "Owner name is required");
    } else if !(3..=50).contains(&char_len(&owner.name)) {
        fail(errors, fields::OWNER_NAME, "Owner name must be between 3 and 50 characters");
    }

    if owner.email.trim().is_empty() {
        fail(errors, fields::OWNER_EMAIL, "Owner email is required");
    } else if !is_valid_email(&owner.email) {
        fail(errors, fields::OWNER_EMAIL, "Please enter a valid email address");
    }

    if owner.phone.trim().is_empty() {
        fail(errors, fields::OWNER_PHONE, "Owner phone is required");
    } else if !is_valid_phone(&owner.phone) {
        fail(errors, fields::OWNER_PHONE, "Please enter a valid mobile number");
    }
}

fn validate_type_and_timing(draft: &DraftEntity, errors: &mut FieldErrors) {
    if draft.restaurant_type.is_none() {
        fail(errors, fields::RESTAURANT_TYPE, "Please select a restaurant type");
    }
    if draft.cuisine_type.is_none() {
        fail(errors, fields::CUISINE_TYPE, "Please select a cuisine type");
    }
    if draft.opening_hours.from.trim().is_empty() {
        fail(errors, fields::OPENING_FROM, "Please enter opening time");
    }
    if draft.opening_hours.to.trim().is_empty() {
        fail(errors, fields::OPENING_TO, "Please enter closing time");
    }
    if let Some(problem) = draft.images.iter().find_map(|image| image.upload_problem()) {
        fail(errors, fields::IMAGES, problem);
    }
}

fn validate_menu(draft: &DraftEntity, errors: &mut FieldErrors) {
    if draft.menu_items.is_empty() {
        fail(errors, fields::MENU_ITEMS, "Please add at least one menu item");
        return;
    }

    let mut seen_ids = HashSet::new();
    for (index, item) in draft.menu_items.iter().enumerate() {
        if item.id.trim().is_empty() || !seen_ids.insert(item.id.as_str()) {
            errors.insert(fields::menu_item(index, "id"), "Menu item id must be unique".to_string());
        }
        if item.name.trim().is_empty() {
            errors.insert(fields::menu_item(index, "name"), "Menu item name is required".to_string());
        }
        if item.description.trim().is_empty() {
            errors.insert(
                fields::menu_item(index, "description"),
                "Menu item description is required".to_string(),
            );
        }
        if !is_positive_price(&item.price) {
            errors.insert(
                fields::menu_item(index, "price"),
                "Price must be a number greater than 0".to_string(),
            );
        }
        if let Some(problem) = item.image.as_ref().and_then(|image| image.upload_problem()) {
            errors.insert(fields::menu_item(index, "image"), problem.to_string());
        }
    }
}

fn is_positive_price(price: &str) -> bool {
    price
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite() && value > 0.0)
        .unwrap_or(false)
}
