//! Falling item kinds and entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Every kind of item that can fall into the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Normal,
    Golden,
    Rotten,
    Bomb,
    Heart,
    Clock,
    Star,
    Magnet,
}

impl ItemKind {
    pub const ALL: [ItemKind; 8] = [
        ItemKind::Normal,
        ItemKind::Golden,
        ItemKind::Rotten,
        ItemKind::Bomb,
        ItemKind::Heart,
        ItemKind::Clock,
        ItemKind::Star,
        ItemKind::Magnet,
    ];

    /// Fixed (width, height) for this kind
    pub fn size(self) -> Vec2 {
        match self {
            ItemKind::Normal | ItemKind::Golden | ItemKind::Rotten => {
                Vec2::new(EGG_WIDTH, EGG_HEIGHT)
            }
            ItemKind::Bomb => Vec2::splat(BOMB_RADIUS * 2.0),
            ItemKind::Heart => Vec2::new(HEART_WIDTH, HEART_HEIGHT),
            ItemKind::Clock => Vec2::splat(CLOCK_RADIUS * 2.0),
            ItemKind::Star => Vec2::new(STAR_WIDTH, STAR_HEIGHT),
            ItemKind::Magnet => Vec2::new(MAGNET_WIDTH, MAGNET_HEIGHT),
        }
    }

    /// Base points for a catch (0 for kinds that never score)
    pub fn base_points(self) -> u64 {
        match self {
            ItemKind::Normal => SCORE_NORMAL,
            ItemKind::Golden => SCORE_GOLDEN,
            ItemKind::Rotten
            | ItemKind::Bomb
            | ItemKind::Heart
            | ItemKind::Clock
            | ItemKind::Star
            | ItemKind::Magnet => 0,
        }
    }

    /// Point-awarding kinds cost a life when they fall past the bottom
    pub fn awards_points(self) -> bool {
        self.base_points() > 0
    }

    /// Catching this kind costs a life and breaks the combo
    pub fn is_hazard(self) -> bool {
        matches!(self, ItemKind::Rotten | ItemKind::Bomb)
    }

    /// Kinds pulled toward the basket while the magnet is active
    pub fn is_magnetic(self) -> bool {
        matches!(self, ItemKind::Normal | ItemKind::Golden | ItemKind::Heart)
    }

    /// The power-up granted by catching this kind, if any
    pub fn power_up(self) -> Option<PowerUpKind> {
        match self {
            ItemKind::Clock => Some(PowerUpKind::SlowMotion),
            ItemKind::Star => Some(PowerUpKind::ScoreMultiplier),
            ItemKind::Magnet => Some(PowerUpKind::Magnet),
            ItemKind::Normal
            | ItemKind::Golden
            | ItemKind::Rotten
            | ItemKind::Bomb
            | ItemKind::Heart => None,
        }
    }
}

/// Time-limited global effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SlowMotion,
    ScoreMultiplier,
    Magnet,
}

impl PowerUpKind {
    /// Duration in milliseconds set on every activation
    pub fn duration_ms(self) -> f32 {
        match self {
            PowerUpKind::SlowMotion => SLOW_MOTION_DURATION,
            PowerUpKind::ScoreMultiplier => MULTIPLIER_DURATION,
            PowerUpKind::Magnet => MAGNET_DURATION,
        }
    }

    /// The item that carries this power-up
    pub fn item_kind(self) -> ItemKind {
        match self {
            PowerUpKind::SlowMotion => ItemKind::Clock,
            PowerUpKind::ScoreMultiplier => ItemKind::Star,
            PowerUpKind::Magnet => ItemKind::Magnet,
        }
    }
}

/// A falling item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl FallingItem {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            vel,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Top edge strictly below the playfield bottom
    pub fn is_past_bottom(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_eggs_award_points() {
        let scoring: Vec<_> = ItemKind::ALL
            .iter()
            .filter(|k| k.awards_points())
            .collect();
        assert_eq!(scoring, vec![&ItemKind::Normal, &ItemKind::Golden]);
    }

    #[test]
    fn test_hazards_are_never_magnetic() {
        for kind in ItemKind::ALL {
            assert!(!(kind.is_hazard() && kind.is_magnetic()), "{:?}", kind);
        }
    }

    #[test]
    fn test_power_up_round_trip_through_item() {
        for kind in ItemKind::ALL {
            if let Some(power) = kind.power_up() {
                assert_eq!(power.item_kind(), kind);
            }
        }
    }

    #[test]
    fn test_bottom_boundary_is_strict() {
        let mut item = FallingItem::new(1, ItemKind::Normal, Vec2::ZERO, Vec2::ZERO);
        item.pos.y = PLAYFIELD_HEIGHT - 1.0;
        assert!(!item.is_past_bottom());
        item.pos.y = PLAYFIELD_HEIGHT;
        assert!(!item.is_past_bottom());
        item.pos.y = PLAYFIELD_HEIGHT + 1.0;
        assert!(item.is_past_bottom());
    }
}
