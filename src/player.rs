//! Player state and per-frame update
//!
//! The player's sprite lives in the world like any other entity; this module
//! owns the stats, timers and input handling. Actions that affect the rest
//! of the level (swinging the weapon, casting, gaining exp) are emitted as
//! events and resolved by the level in one place.

use macroquad::math::Vec2;

use crate::game::event::{MagicCastEvent, WeaponRecallEvent, WeaponSwingEvent};
use crate::game::world::move_and_collide;
use crate::game::{Entity, Events, SpriteGroup, World};
use crate::input::InputState;
use crate::settings::*;

/// The five upgradable stats, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    Energy,
    Attack,
    Magic,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 5] = [Stat::Health, Stat::Energy, Stat::Attack, Stat::Magic, Stat::Speed];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Health => "Health",
            Stat::Energy => "Energy",
            Stat::Attack => "Attack",
            Stat::Magic => "Magic",
            Stat::Speed => "Speed",
        }
    }
}

/// Mutable player state outside the sprite world.
#[derive(Debug)]
pub struct PlayerState {
    /// Current stat values, indexed by `Stat`. Health/energy entries are the
    /// maxima for the matching pools below.
    pub stats: [f32; 5],
    pub max_stats: [f32; 5],
    pub upgrade_cost: [f32; 5],

    pub health: f32,
    pub energy: f32,
    pub exp: f32,

    /// Cleared when hit; restored after the invulnerability window.
    pub vulnerable: bool,
    pub hurt_time: f64,

    /// Current movement input.
    pub direction: Vec2,
    /// Last non-zero movement direction; weapons and flames aim along it.
    pub facing: Vec2,

    pub attacking: bool,
    attack_time: f64,
    attack_duration: f64,

    pub weapon: WeaponKind,
    pub magic: MagicKind,
    weapon_switch_time: f64,
    magic_switch_time: f64,
    can_switch_weapon: bool,
    can_switch_magic: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            stats: [PLAYER_HEALTH, PLAYER_ENERGY, PLAYER_ATTACK, PLAYER_MAGIC, PLAYER_SPEED],
            max_stats: [
                PLAYER_MAX_HEALTH,
                PLAYER_MAX_ENERGY,
                PLAYER_MAX_ATTACK,
                PLAYER_MAX_MAGIC,
                PLAYER_MAX_SPEED,
            ],
            upgrade_cost: [UPGRADE_BASE_COST; 5],
            health: PLAYER_HEALTH,
            energy: PLAYER_ENERGY,
            exp: 0.0,
            vulnerable: true,
            hurt_time: 0.0,
            direction: Vec2::ZERO,
            facing: Vec2::new(0.0, 1.0),
            attacking: false,
            attack_time: 0.0,
            attack_duration: 0.0,
            weapon: WeaponKind::Sword,
            magic: MagicKind::Heal,
            weapon_switch_time: 0.0,
            magic_switch_time: 0.0,
            can_switch_weapon: true,
            can_switch_magic: true,
        }
    }

    pub fn stat(&self, stat: Stat) -> f32 {
        self.stats[stat as usize]
    }

    pub fn max_stat(&self, stat: Stat) -> f32 {
        self.max_stats[stat as usize]
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Spend exp on one upgrade. Returns false (and changes nothing) if the
    /// stat is maxed out or exp is short.
    pub fn purchase(&mut self, stat: Stat) -> bool {
        let idx = stat as usize;
        let cost = self.upgrade_cost[idx];
        if self.exp < cost || self.stats[idx] >= self.max_stats[idx] {
            return false;
        }
        self.exp -= cost;
        self.stats[idx] = (self.stats[idx] * UPGRADE_STAT_GROWTH).min(self.max_stats[idx]);
        self.upgrade_cost[idx] *= UPGRADE_COST_GROWTH;
        true
    }

    /// Advance timers, read input and move the player sprite.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &InputState,
        now: f64,
        dt: f32,
        world: &mut World,
        entity: Entity,
        obstacles: &SpriteGroup,
        events: &mut Events,
    ) {
        self.tick_cooldowns(now, events);

        // Input is ignored for the duration of a swing or cast
        if self.attacking {
            self.direction = Vec2::ZERO;
        } else {
            self.direction = input.direction;

            if input.attack {
                self.start_action(now, ATTACK_BASE_TIME + self.weapon.data().cooldown);
                events.weapon_swing.send(WeaponSwingEvent);
            } else if input.magic {
                self.start_action(now, ATTACK_BASE_TIME);
                events.magic.send(MagicCastEvent { kind: self.magic });
            }

            if input.switch_weapon && self.can_switch_weapon {
                self.weapon = self.weapon.next();
                self.can_switch_weapon = false;
                self.weapon_switch_time = now;
            }
            if input.switch_magic && self.can_switch_magic {
                self.magic = self.magic.next();
                self.can_switch_magic = false;
                self.magic_switch_time = now;
            }
        }

        if self.direction != Vec2::ZERO {
            self.facing = self.direction.normalize_or_zero();
            move_and_collide(world, entity, self.direction, self.stat(Stat::Speed), dt, obstacles);
        }

        // Passive energy recovery scales with the magic stat
        let energy_max = self.stat(Stat::Energy);
        self.energy = (self.energy + self.stat(Stat::Magic) * ENERGY_RECOVERY_RATE * dt)
            .min(energy_max);
    }

    fn start_action(&mut self, now: f64, duration: f64) {
        self.attacking = true;
        self.attack_time = now;
        self.attack_duration = duration;
    }

    fn tick_cooldowns(&mut self, now: f64, events: &mut Events) {
        if self.attacking && now - self.attack_time >= self.attack_duration {
            self.attacking = false;
            events.weapon_recall.send(WeaponRecallEvent);
        }
        if !self.vulnerable && now - self.hurt_time >= PLAYER_INVULN_TIME {
            self.vulnerable = true;
        }
        if !self.can_switch_weapon && now - self.weapon_switch_time >= SWITCH_COOLDOWN {
            self.can_switch_weapon = true;
        }
        if !self.can_switch_magic && now - self.magic_switch_time >= SWITCH_COOLDOWN {
            self.can_switch_magic = true;
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    fn fixture() -> (World, Entity, SpriteGroup, Events) {
        let mut world = World::new();
        let entity = world.spawn_player(vec2(0.0, 0.0));
        (world, entity, SpriteGroup::new(), Events::new())
    }

    #[test]
    fn attack_input_emits_one_swing_event() {
        let (mut world, entity, obstacles, mut events) = fixture();
        let mut player = PlayerState::new();
        let input = InputState { attack: true, ..InputState::default() };

        player.update(&input, 0.0, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert!(player.attacking);
        assert_eq!(events.weapon_swing.len(), 1);

        // Held input does not retrigger while the swing is active
        player.update(&input, 0.1, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert_eq!(events.weapon_swing.len(), 1);
    }

    #[test]
    fn swing_ends_after_its_duration_and_recalls_the_weapon() {
        let (mut world, entity, obstacles, mut events) = fixture();
        let mut player = PlayerState::new();
        let input = InputState { attack: true, ..InputState::default() };

        player.update(&input, 0.0, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        let duration = ATTACK_BASE_TIME + player.weapon.data().cooldown;

        let idle = InputState::default();
        player.update(&idle, duration + 0.01, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert!(!player.attacking);
        assert_eq!(events.weapon_recall.len(), 1);
    }

    #[test]
    fn magic_input_emits_a_cast_event() {
        let (mut world, entity, obstacles, mut events) = fixture();
        let mut player = PlayerState::new();
        let input = InputState { magic: true, ..InputState::default() };

        player.update(&input, 0.0, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        let casts: Vec<_> = events.magic.drain().collect();
        assert_eq!(casts.len(), 1);
        assert_eq!(casts[0].kind, MagicKind::Heal);
    }

    #[test]
    fn weapon_switch_has_a_cooldown() {
        let (mut world, entity, obstacles, mut events) = fixture();
        let mut player = PlayerState::new();
        let input = InputState { switch_weapon: true, ..InputState::default() };

        player.update(&input, 0.0, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert_eq!(player.weapon, WeaponKind::Lance);

        // Immediately again: blocked
        player.update(&input, 0.05, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert_eq!(player.weapon, WeaponKind::Lance);

        // After the cooldown: allowed
        player.update(&input, SWITCH_COOLDOWN + 0.06, 1.0 / 60.0, &mut world, entity, &obstacles, &mut events);
        assert_eq!(player.weapon, WeaponKind::Axe);
    }

    #[test]
    fn purchase_spends_exp_and_raises_cost() {
        let mut player = PlayerState::new();
        player.exp = 250.0;

        assert!(player.purchase(Stat::Attack));
        assert_eq!(player.exp, 150.0);
        assert!((player.stat(Stat::Attack) - PLAYER_ATTACK * UPGRADE_STAT_GROWTH).abs() < 1e-4);
        assert!((player.upgrade_cost[Stat::Attack as usize]
            - UPGRADE_BASE_COST * UPGRADE_COST_GROWTH)
            .abs()
            < 1e-4);

        // Second purchase now costs 140: 150 exp is enough exactly once more
        assert!(player.purchase(Stat::Attack));
        assert!(!player.purchase(Stat::Attack));
    }

    #[test]
    fn purchase_fails_without_exp() {
        let mut player = PlayerState::new();
        player.exp = 50.0;
        assert!(!player.purchase(Stat::Health));
        assert_eq!(player.exp, 50.0);
        assert_eq!(player.stat(Stat::Health), PLAYER_HEALTH);
    }

    #[test]
    fn stat_growth_is_capped_at_the_maximum() {
        let mut player = PlayerState::new();
        player.exp = 1_000_000.0;
        player.stats[Stat::Speed as usize] = PLAYER_MAX_SPEED / 1.1;

        assert!(player.purchase(Stat::Speed));
        assert_eq!(player.stat(Stat::Speed), PLAYER_MAX_SPEED);
        // Maxed stats cannot be purchased again
        assert!(!player.purchase(Stat::Speed));
    }
}
