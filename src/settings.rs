//! Game constants and data tables
//!
//! Tuning values for tiles, the player, weapons, magic and monsters live
//! here so gameplay code never hard-codes numbers. Speeds are in pixels per
//! second, cooldowns and timers in seconds.

use macroquad::prelude::Color;

/// Side length of one map tile in world pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Viewport dimensions. The camera always centers the player inside this.
pub const VIEW_WIDTH: f32 = 1280.0;
pub const VIEW_HEIGHT: f32 = 720.0;

/// Background color behind the floor image (open water).
pub const WATER_COLOR: Color = Color::new(0.44, 0.67, 0.70, 1.0);

/// Default frame-rate cap.
pub const DEFAULT_FPS_CAP: u32 = 60;

// =============================================================================
// Player tuning
// =============================================================================

pub const PLAYER_HEALTH: f32 = 100.0;
pub const PLAYER_ENERGY: f32 = 60.0;
pub const PLAYER_ATTACK: f32 = 10.0;
pub const PLAYER_MAGIC: f32 = 4.0;
pub const PLAYER_SPEED: f32 = 300.0;

pub const PLAYER_MAX_HEALTH: f32 = 300.0;
pub const PLAYER_MAX_ENERGY: f32 = 140.0;
pub const PLAYER_MAX_ATTACK: f32 = 20.0;
pub const PLAYER_MAX_MAGIC: f32 = 10.0;
pub const PLAYER_MAX_SPEED: f32 = 600.0;

/// Starting experience cost of one upgrade, identical for every stat.
pub const UPGRADE_BASE_COST: f32 = 100.0;
/// Cost growth per purchase.
pub const UPGRADE_COST_GROWTH: f32 = 1.4;
/// Stat growth per purchase (capped at the stat maximum).
pub const UPGRADE_STAT_GROWTH: f32 = 1.2;

/// Hit-invulnerability window after the player takes damage.
pub const PLAYER_INVULN_TIME: f64 = 0.5;
/// Extra swing time added on top of the weapon cooldown.
pub const ATTACK_BASE_TIME: f64 = 0.4;
/// Delay between weapon or spell switches.
pub const SWITCH_COOLDOWN: f64 = 0.2;
/// Energy regained per second per point of the magic stat.
pub const ENERGY_RECOVERY_RATE: f32 = 0.6;

/// Player hit-box is narrower and shorter than the draw rect.
pub const PLAYER_HITBOX_INSET: (f32, f32) = (-6.0, -26.0);

// =============================================================================
// Enemy tuning
// =============================================================================

/// Invulnerability window after an enemy is hit.
pub const ENEMY_INVULN_TIME: f64 = 0.3;
/// Delay between consecutive attacks from one enemy.
pub const ENEMY_ATTACK_COOLDOWN: f64 = 0.4;

// =============================================================================
// Magic tuning
// =============================================================================

/// How long a flame projectile sprite stays alive.
pub const FLAME_LIFETIME: f32 = 0.5;
/// How long the heal aura sprite stays alive.
pub const AURA_LIFETIME: f32 = 0.4;
/// Number of flame sprites spawned along the facing direction.
pub const FLAME_COUNT: u32 = 3;

// =============================================================================
// Weapons
// =============================================================================

/// The melee weapons the player can cycle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Sword,
    Lance,
    Axe,
    Rapier,
    Sai,
}

/// Static tuning data for one weapon.
#[derive(Debug, Clone, Copy)]
pub struct WeaponData {
    pub name: &'static str,
    /// Extra cooldown the swing adds, in seconds.
    pub cooldown: f64,
    pub damage: f32,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::Sword,
        WeaponKind::Lance,
        WeaponKind::Axe,
        WeaponKind::Rapier,
        WeaponKind::Sai,
    ];

    pub fn data(self) -> WeaponData {
        match self {
            WeaponKind::Sword => WeaponData { name: "sword", cooldown: 0.10, damage: 15.0 },
            WeaponKind::Lance => WeaponData { name: "lance", cooldown: 0.40, damage: 30.0 },
            WeaponKind::Axe => WeaponData { name: "axe", cooldown: 0.30, damage: 20.0 },
            WeaponKind::Rapier => WeaponData { name: "rapier", cooldown: 0.05, damage: 8.0 },
            WeaponKind::Sai => WeaponData { name: "sai", cooldown: 0.08, damage: 10.0 },
        }
    }

    /// Next weapon in the cycle (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

// =============================================================================
// Magic
// =============================================================================

/// The spells the player can cycle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagicKind {
    Heal,
    Flame,
}

/// Static tuning data for one spell.
#[derive(Debug, Clone, Copy)]
pub struct MagicData {
    pub name: &'static str,
    pub strength: f32,
    pub cost: f32,
}

impl MagicKind {
    pub const ALL: [MagicKind; 2] = [MagicKind::Heal, MagicKind::Flame];

    pub fn data(self) -> MagicData {
        match self {
            MagicKind::Heal => MagicData { name: "heal", strength: 20.0, cost: 10.0 },
            MagicKind::Flame => MagicData { name: "flame", strength: 5.0, cost: 20.0 },
        }
    }

    pub fn next(self) -> Self {
        match self {
            MagicKind::Heal => MagicKind::Flame,
            MagicKind::Flame => MagicKind::Heal,
        }
    }
}

// =============================================================================
// Monsters
// =============================================================================

/// The enemy species that appear on the entity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Bamboo,
    Spirit,
    Raccoon,
    Squid,
}

/// The flavor of an enemy attack, used to pick hit particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Slash,
    Claw,
    Thunder,
    Leaf,
}

/// Static tuning data for one enemy species.
#[derive(Debug, Clone, Copy)]
pub struct MonsterData {
    pub name: &'static str,
    pub health: f32,
    pub exp: f32,
    pub damage: f32,
    pub attack_kind: HitKind,
    pub speed: f32,
    /// Knockback multiplier when hit.
    pub resistance: f32,
    /// Distance at which the enemy attacks.
    pub attack_radius: f32,
    /// Distance at which the enemy starts chasing.
    pub notice_radius: f32,
}

impl MonsterKind {
    pub fn data(self) -> MonsterData {
        match self {
            MonsterKind::Squid => MonsterData {
                name: "squid",
                health: 100.0,
                exp: 100.0,
                damage: 20.0,
                attack_kind: HitKind::Slash,
                speed: 180.0,
                resistance: 3.0,
                attack_radius: 80.0,
                notice_radius: 360.0,
            },
            MonsterKind::Raccoon => MonsterData {
                name: "raccoon",
                health: 300.0,
                exp: 250.0,
                damage: 40.0,
                attack_kind: HitKind::Claw,
                speed: 120.0,
                resistance: 3.0,
                attack_radius: 120.0,
                notice_radius: 400.0,
            },
            MonsterKind::Spirit => MonsterData {
                name: "spirit",
                health: 100.0,
                exp: 110.0,
                damage: 8.0,
                attack_kind: HitKind::Thunder,
                speed: 240.0,
                resistance: 3.0,
                attack_radius: 60.0,
                notice_radius: 350.0,
            },
            MonsterKind::Bamboo => MonsterData {
                name: "bamboo",
                health: 70.0,
                exp: 120.0,
                damage: 6.0,
                attack_kind: HitKind::Leaf,
                speed: 180.0,
                resistance: 3.0,
                attack_radius: 50.0,
                notice_radius: 300.0,
            },
        }
    }

    /// Map an entity-layer cell code to a species.
    /// Unknown codes fall back to squid; the stock maps use no others.
    pub fn from_code(code: i32) -> Self {
        match code {
            390 => MonsterKind::Bamboo,
            391 => MonsterKind::Spirit,
            392 => MonsterKind::Raccoon,
            _ => MonsterKind::Squid,
        }
    }
}

/// Entity-layer cell code that marks the player start.
pub const PLAYER_START_CODE: i32 = 394;

/// Number of grass images to pick from when spawning a grass tile.
pub const GRASS_VARIANT_COUNT: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_cycle_wraps() {
        let mut kind = WeaponKind::Sword;
        for _ in 0..WeaponKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, WeaponKind::Sword);
    }

    #[test]
    fn monster_codes_map_to_species() {
        assert_eq!(MonsterKind::from_code(390), MonsterKind::Bamboo);
        assert_eq!(MonsterKind::from_code(391), MonsterKind::Spirit);
        assert_eq!(MonsterKind::from_code(392), MonsterKind::Raccoon);
        assert_eq!(MonsterKind::from_code(393), MonsterKind::Squid);
        // Unknown codes are squids too
        assert_eq!(MonsterKind::from_code(9999), MonsterKind::Squid);
    }

    #[test]
    fn magic_cycle_alternates() {
        assert_eq!(MagicKind::Heal.next(), MagicKind::Flame);
        assert_eq!(MagicKind::Flame.next(), MagicKind::Heal);
    }
}
