//! Sprite roles
//!
//! Every sprite carries exactly one `SpriteKind`. The closed enum replaces
//! any "does this thing have an attribute" probing: systems match on the
//! kind and the compiler checks the cases.

use macroquad::math::Rect;

use crate::settings::{MagicKind, MonsterKind, WeaponKind};

/// Static map tile roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Invisible collision block at the map border and on water.
    Boundary,
    /// Destructible decoration; also an obstacle.
    Grass,
    /// Large scenery (trees, statues); drawn one tile tall above its cell.
    Object,
}

impl TileKind {
    /// Vertical hit-box inset. Tiles collide with a rect shorter than the
    /// drawn image so the player can walk "behind" them.
    pub fn hitbox_inset(self) -> f32 {
        match self {
            TileKind::Boundary => 0.0,
            TileKind::Grass => -10.0,
            TileKind::Object => -40.0,
        }
    }
}

/// What a sprite is. One role per sprite, fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Boundary,
    /// `variant` picks one of the grass images.
    Grass { variant: usize },
    /// `index` picks the scenery image from the object folder.
    Object { index: usize },
    Player,
    Enemy(MonsterKind),
    /// The active melee weapon sprite.
    Weapon(WeaponKind),
    /// A flame projectile sprite (participates in attack collisions).
    Flame,
    /// The heal glow around the player (visual only).
    HealAura,
}

impl SpriteKind {
    pub fn is_grass(self) -> bool {
        matches!(self, SpriteKind::Grass { .. })
    }

    pub fn is_enemy(self) -> bool {
        matches!(self, SpriteKind::Enemy(_))
    }

    /// The magic school a sprite belongs to, if any.
    pub fn magic(self) -> Option<MagicKind> {
        match self {
            SpriteKind::Flame => Some(MagicKind::Flame),
            SpriteKind::HealAura => Some(MagicKind::Heal),
            _ => None,
        }
    }
}

/// Grow (positive) or shrink (negative) a rect around its center.
pub fn inflate(rect: Rect, dx: f32, dy: f32) -> Rect {
    Rect::new(
        rect.x - dx / 2.0,
        rect.y - dy / 2.0,
        rect.w + dx,
        rect.h + dy,
    )
}
