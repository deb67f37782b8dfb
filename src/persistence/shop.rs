//! Cosmetic shop catalogue

use serde::{Deserialize, Serialize};

/// Basket character drawn by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skin {
    #[default]
    Robot,
    Stickman,
}

/// Extra sprite layered over the skin; several may be worn at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    TopHat,
    Sunglasses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopCategory {
    Skins,
    Accessories,
}

/// Anything the shop sells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItemId {
    Skin(Skin),
    Accessory(Accessory),
}

impl ShopItemId {
    pub fn category(self) -> ShopCategory {
        match self {
            ShopItemId::Skin(_) => ShopCategory::Skins,
            ShopItemId::Accessory(_) => ShopCategory::Accessories,
        }
    }

    /// Stable string id, as used in saved profiles
    pub fn as_str(self) -> &'static str {
        match self {
            ShopItemId::Skin(Skin::Robot) => "robot",
            ShopItemId::Skin(Skin::Stickman) => "stickman",
            ShopItemId::Accessory(Accessory::TopHat) => "top_hat",
            ShopItemId::Accessory(Accessory::Sunglasses) => "sunglasses",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        SHOP_ITEMS.iter().map(|item| item.id).find(|item| item.as_str() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: &'static str,
    pub price: u64,
    pub description: &'static str,
}

pub const SHOP_ITEMS: [ShopItem; 4] = [
    ShopItem {
        id: ShopItemId::Skin(Skin::Robot),
        name: "Robot",
        price: 0,
        description: "The default schematic.",
    },
    ShopItem {
        id: ShopItemId::Skin(Skin::Stickman),
        name: "Stickman",
        price: 500,
        description: "A lightweight, agile design.",
    },
    ShopItem {
        id: ShopItemId::Accessory(Accessory::TopHat),
        name: "Top Hat",
        price: 150,
        description: "For the distinguished engineer.",
    },
    ShopItem {
        id: ShopItemId::Accessory(Accessory::Sunglasses),
        name: "Sunglasses",
        price: 200,
        description: "Boosts operational coolness.",
    },
];

impl ShopItem {
    /// Catalogue entry for `id`. Every id is listed.
    pub fn lookup(id: ShopItemId) -> &'static ShopItem {
        match id {
            ShopItemId::Skin(Skin::Robot) => &SHOP_ITEMS[0],
            ShopItemId::Skin(Skin::Stickman) => &SHOP_ITEMS[1],
            ShopItemId::Accessory(Accessory::TopHat) => &SHOP_ITEMS[2],
            ShopItemId::Accessory(Accessory::Sunglasses) => &SHOP_ITEMS[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_table() {
        for item in &SHOP_ITEMS {
            assert_eq!(ShopItem::lookup(item.id), item);
            assert_eq!(ShopItemId::parse(item.id.as_str()), Some(item.id));
        }
        assert_eq!(ShopItemId::parse("cape"), None);
    }

    #[test]
    fn test_ids_match_serde_names() {
        let skin = serde_json::to_string(&Skin::Stickman).unwrap();
        assert_eq!(skin, format!("\"{}\"", ShopItemId::Skin(Skin::Stickman).as_str()));
        let hat = serde_json::to_string(&Accessory::TopHat).unwrap();
        assert_eq!(hat, format!("\"{}\"", ShopItemId::Accessory(Accessory::TopHat).as_str()));
    }
}
