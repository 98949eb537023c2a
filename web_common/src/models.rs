//! Closed enumerations shared with the backend.
//!
//! Every enumeration serializes as its `SCREAMING_SNAKE_CASE` wire value and
//! exposes `all()`, `display_name()` and `value()` for select inputs.

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Get all members in display order.
            pub fn all() -> Vec<$name> {
                vec![$($name::$variant),+]
            }

            /// Get the label shown in the console.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Get the wire value (also used as the HTML select value).
            pub fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.value())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
                match normalized.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!("Unknown {}: {}", stringify!($name), s)),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of establishment.
    RestaurantType {
        Restaurant => ("RESTAURANT", "Restaurant"),
        Pub => ("PUB", "Pub"),
        Hotel => ("HOTEL", "Hotel"),
        CoffeeShop => ("COFFEE_SHOP", "Coffee Shop"),
        Other => ("OTHER", "Other"),
    }
}

wire_enum! {
    /// Cuisine served by a restaurant.
    CuisineType {
        African => ("AFRICAN", "African"),
        European => ("EUROPEAN", "European"),
        Asian => ("ASIAN", "Asian"),
        Mediterranean => ("MEDITERRANEAN", "Mediterranean"),
        MiddleEastern => ("MIDDLE_EASTERN", "Middle Eastern"),
        Other => ("OTHER", "Other"),
    }
}

wire_enum! {
    /// Menu section a dish is listed under.
    MenuCategory {
        Drink => ("DRINK", "Drink"),
        Starter => ("STARTER", "Starter"),
        Appetizer => ("APPETIZER", "Appetizer"),
        Dessert => ("DESSERT", "Dessert"),
        Main => ("MAIN", "Main"),
    }
}

impl Default for MenuCategory {
    fn default() -> Self {
        MenuCategory::Drink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_wire_values() {
        assert_eq!("Coffee Shop".parse::<RestaurantType>(), Ok(RestaurantType::CoffeeShop));
        assert_eq!("COFFEE_SHOP".parse::<RestaurantType>(), Ok(RestaurantType::CoffeeShop));
        assert_eq!("middle-eastern".parse::<CuisineType>(), Ok(CuisineType::MiddleEastern));
        assert_eq!("main".parse::<MenuCategory>(), Ok(MenuCategory::Main));
        assert!("Bistro".parse::<RestaurantType>().is_err());
    }

    #[test]
    fn serializes_as_wire_value() {
        let json = serde_json::to_string(&CuisineType::MiddleEastern).unwrap();
        assert_eq!(json, "\"MIDDLE_EASTERN\"");
        let back: MenuCategory = serde_json::from_str("\"DESSERT\"").unwrap();
        assert_eq!(back, MenuCategory::Dessert);
    }

    #[test]
    fn all_lists_every_member_once() {
        assert_eq!(RestaurantType::all().len(), 5);
        assert_eq!(CuisineType::all().len(), 6);
        assert_eq!(MenuCategory::all().len(), 5);
    }
}
