//! Basket/item collision detection
//!
//! Everything is axis-aligned: items and the basket are rectangles, overlap is
//! strict (touching edges do not count).

use glam::Vec2;

use super::item::FallingItem;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.pos.x
            && self.pos.x < other.right()
            && self.bottom() > other.pos.y
            && self.pos.y < other.bottom()
    }
}

impl From<&FallingItem> for Rect {
    fn from(item: &FallingItem) -> Self {
        Rect::new(item.pos, item.size)
    }
}

/// Basket hitbox for a player at `player_x`, centred under the sprite
pub fn basket_rect(player_x: f32) -> Rect {
    Rect::new(
        Vec2::new(
            player_x + (PLAYER_WIDTH - BASKET_WIDTH) / 2.0,
            crate::basket_top(),
        ),
        Vec2::new(BASKET_WIDTH, BASKET_HEIGHT),
    )
}

/// How an item leaves play this frame, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught,
    Missed,
}

/// Classify one item against the basket. Catch wins over miss.
pub fn classify(item: &FallingItem, basket: &Rect) -> Option<Outcome> {
    if Rect::from(item).overlaps(basket) {
        Some(Outcome::Caught)
    } else if item.is_past_bottom() {
        Some(Outcome::Missed)
    } else {
        None
    }
}

/// Reflect horizontal velocity back into the playfield and clamp position.
/// Returns true when the item touched a wall.
pub fn bounce_off_walls(item: &mut FallingItem) -> bool {
    let max_x = PLAYFIELD_WIDTH - item.size.x;
    if item.pos.x <= 0.0 {
        item.vel.x = item.vel.x.abs();
        item.pos.x = 0.0;
        true
    } else if item.pos.x >= max_x {
        item.vel.x = -item.vel.x.abs();
        item.pos.x = max_x;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::item::ItemKind;

    fn item_at(x: f32, y: f32) -> FallingItem {
        FallingItem::new(1, ItemKind::Normal, Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_basket_is_centred_under_player() {
        let basket = basket_rect(100.0);
        assert_eq!(basket.pos, Vec2::new(95.0, 560.0));
        assert_eq!(basket.right(), 185.0);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        let c = Rect::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_classify() {
        let basket = basket_rect(100.0);
        assert_eq!(classify(&item_at(120.0, 540.0), &basket), Some(Outcome::Caught));
        assert_eq!(classify(&item_at(500.0, 300.0), &basket), None);
        assert_eq!(classify(&item_at(500.0, 600.0), &basket), None);
        assert_eq!(classify(&item_at(500.0, 601.0), &basket), Some(Outcome::Missed));
    }

    #[test]
    fn test_bounce_points_velocity_inward() {
        let mut item = item_at(-3.0, 0.0);
        item.vel.x = -20.0;
        assert!(bounce_off_walls(&mut item));
        assert_eq!(item.pos.x, 0.0);
        assert_eq!(item.vel.x, 20.0);
        // Already moving inward at the wall: stays inward
        assert!(bounce_off_walls(&mut item));
        assert_eq!(item.vel.x, 20.0);

        let mut right = item_at(PLAYFIELD_WIDTH, 0.0);
        right.vel.x = 15.0;
        assert!(bounce_off_walls(&mut right));
        assert_eq!(right.pos.x, PLAYFIELD_WIDTH - EGG_WIDTH);
        assert_eq!(right.vel.x, -15.0);
    }
}
