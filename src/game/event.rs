//! Event queues
//!
//! Player and enemy updates never call into the level directly; they push
//! events here and the level drains every queue in a single step per frame.
//! That keeps entity logic free of the level's method set and makes the
//! frame order explicit.

use macroquad::math::Vec2;

use crate::settings::{HitKind, MagicKind, MonsterKind};

/// A queue for events of one type, drained once per frame.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event types
// =============================================================================

/// Player pressed attack: spawn the melee weapon sprite.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSwingEvent;

/// The swing timer ran out: clear the melee weapon sprite.
#[derive(Debug, Clone, Copy)]
pub struct WeaponRecallEvent;

/// Player cast a spell.
#[derive(Debug, Clone, Copy)]
pub struct MagicCastEvent {
    pub kind: MagicKind,
}

/// An enemy landed a hit on the player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerHitEvent {
    pub amount: f32,
    pub attack: HitKind,
}

/// An enemy died; burst particles at its last position.
#[derive(Debug, Clone, Copy)]
pub struct DeathBurstEvent {
    pub position: Vec2,
    pub kind: MonsterKind,
}

/// The player earned experience.
#[derive(Debug, Clone, Copy)]
pub struct ExpGainEvent {
    pub amount: f32,
}

/// All event queues, one field per event type.
#[derive(Debug, Default)]
pub struct Events {
    pub weapon_swing: EventQueue<WeaponSwingEvent>,
    pub weapon_recall: EventQueue<WeaponRecallEvent>,
    pub magic: EventQueue<MagicCastEvent>,
    pub player_hit: EventQueue<PlayerHitEvent>,
    pub death_burst: EventQueue<DeathBurstEvent>,
    pub exp_gain: EventQueue<ExpGainEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}
