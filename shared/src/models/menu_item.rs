//! Menu Item Model

use super::money::Money;
use serde::{Deserialize, Serialize};

/// Per-order quantity cap applied when a menu item leaves it unset
pub const DEFAULT_MAX_QUANTITY_PER_ORDER: i32 = 10;

/// Menu item entity (a sellable dish)
///
/// `is_available` is the sold-out switch flipped during service;
/// `is_active = false` removes the item from the menu entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub store_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub image_path: Option<String>,
    pub image_thumbnail_path: Option<String>,
    pub max_quantity_per_order: Option<i32>,
    pub display_order: i32,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Effective per-order quantity cap
    pub fn quantity_cap(&self) -> i32 {
        self.max_quantity_per_order
            .unwrap_or(DEFAULT_MAX_QUANTITY_PER_ORDER)
    }

    /// Whether diners may put this item in a cart right now
    pub fn is_orderable(&self) -> bool {
        self.is_active && self.is_available
    }
}

/// Lightweight menu listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_available: bool,
    pub is_active: bool,
    pub max_quantity_per_order: Option<i32>,
}

/// Menu item with its category name and image variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_name: Option<String>,
    pub images: Vec<MenuItemImage>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub store_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub image_path: Option<String>,
    pub image_thumbnail_path: Option<String>,
    pub max_quantity_per_order: Option<i32>,
    pub display_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub image_path: Option<String>,
    pub image_thumbnail_path: Option<String>,
    pub max_quantity_per_order: Option<i32>,
    pub display_order: Option<i32>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
}

text_enum! {
    /// Stored image variant of a menu item
    pub enum ImageType {
        Original => "original",
        Thumbnail => "thumbnail",
        Large => "large",
    }
}

/// Image metadata, one row per (menu item, image type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemImage {
    pub id: i64,
    pub menu_item_id: i64,
    pub image_type: ImageType,
    pub file_path: String,
    /// Bytes
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub mime_type: String,
    pub uploaded_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Register or replace the image of one type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemImageUpsert {
    pub image_type: String,
    pub file_path: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cap: Option<i32>, available: bool, active: bool) -> MenuItem {
        MenuItem {
            id: 1,
            store_id: 1,
            category_id: None,
            name: "Karaage".to_string(),
            description: None,
            price: Money::from_units(850),
            image_path: None,
            image_thumbnail_path: None,
            max_quantity_per_order: cap,
            display_order: 0,
            is_available: available,
            is_active: active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_quantity_cap_defaults_to_ten() {
        assert_eq!(item(None, true, true).quantity_cap(), 10);
        assert_eq!(item(Some(3), true, true).quantity_cap(), 3);
    }

    #[test]
    fn test_orderable_requires_active_and_available() {
        assert!(item(None, true, true).is_orderable());
        assert!(!item(None, false, true).is_orderable());
        assert!(!item(None, true, false).is_orderable());
    }

    #[test]
    fn test_image_type_parses() {
        assert_eq!("thumbnail".parse::<ImageType>(), Ok(ImageType::Thumbnail));
        assert!("banner".parse::<ImageType>().is_err());
    }

    #[test]
    fn test_detail_flattens_item_fields() {
        let detail = MenuItemDetail {
            item: item(None, true, true),
            category_name: Some("Fried".to_string()),
            images: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Karaage");
        assert_eq!(json["price"], "850.00");
        assert_eq!(json["category_name"], "Fried");
    }
}
