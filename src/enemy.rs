//! Enemy state machine and per-frame update
//!
//! Enemies idle until the player comes inside their notice radius, chase
//! until inside their attack radius, then attack on a cooldown. Damage to
//! the player and death effects are emitted as events; the level applies
//! them in its single event step.

use macroquad::math::Vec2;

use crate::game::event::{DeathBurstEvent, ExpGainEvent, PlayerHitEvent};
use crate::game::world::move_and_collide;
use crate::game::{Entity, Events, SpriteGroup, World};
use crate::settings::{MonsterKind, ENEMY_ATTACK_COOLDOWN, ENEMY_INVULN_TIME};

/// What an enemy is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStatus {
    Idle,
    Chase,
    Attack,
}

/// Mutable state carried by every enemy sprite.
#[derive(Debug, Clone, Copy)]
pub struct EnemyState {
    pub kind: MonsterKind,
    pub health: f32,
    pub status: EnemyStatus,
    /// Cleared when hit; restored after the invulnerability window.
    pub vulnerable: bool,
    pub hit_time: f64,
    pub can_attack: bool,
    pub attack_time: f64,
}

impl EnemyState {
    pub fn new(kind: MonsterKind) -> Self {
        Self {
            kind,
            health: kind.data().health,
            status: EnemyStatus::Idle,
            vulnerable: true,
            hit_time: 0.0,
            can_attack: true,
            attack_time: 0.0,
        }
    }
}

/// Apply damage to one enemy, honoring its invulnerability window.
/// Death is resolved by the next `update_enemies` pass.
pub fn damage_enemy(world: &mut World, entity: Entity, amount: f32, now: f64) {
    if let Some(state) = world.enemies.get_mut(entity) {
        if state.vulnerable {
            state.health -= amount;
            state.vulnerable = false;
            state.hit_time = now;
        }
    }
}

/// Run the state machine for every enemy found in `sprites`
/// (the level passes its visible group, as the draw pass owns all enemies).
pub fn update_enemies(
    world: &mut World,
    sprites: &SpriteGroup,
    obstacles: &SpriteGroup,
    player_center: Vec2,
    events: &mut Events,
    now: f64,
    dt: f32,
) {
    let enemies: Vec<Entity> = sprites
        .iter()
        .filter(|e| world.kinds.get(*e).is_some_and(|k| k.is_enemy()))
        .collect();

    for entity in enemies {
        let Some(mut state) = world.enemies.get(entity).copied() else {
            continue;
        };
        let Some(rect) = world.rects.get(entity).copied() else {
            continue;
        };

        // Timers
        if !state.vulnerable && now - state.hit_time >= ENEMY_INVULN_TIME {
            state.vulnerable = true;
        }
        if !state.can_attack && now - state.attack_time >= ENEMY_ATTACK_COOLDOWN {
            state.can_attack = true;
        }

        if state.health <= 0.0 {
            let data = state.kind.data();
            events.death_burst.send(DeathBurstEvent {
                position: rect.center(),
                kind: state.kind,
            });
            events.exp_gain.send(ExpGainEvent { amount: data.exp });
            world.despawn(entity);
            continue;
        }

        let data = state.kind.data();
        let to_player = player_center - rect.center();
        let distance = to_player.length();
        let direction = to_player.normalize_or_zero();

        state.status = if distance <= data.attack_radius && state.can_attack {
            EnemyStatus::Attack
        } else if distance <= data.notice_radius {
            EnemyStatus::Chase
        } else {
            EnemyStatus::Idle
        };

        match state.status {
            EnemyStatus::Attack => {
                events.player_hit.send(PlayerHitEvent {
                    amount: data.damage,
                    attack: data.attack_kind,
                });
                state.can_attack = false;
                state.attack_time = now;
            }
            EnemyStatus::Chase => {
                // Recently hit enemies recoil away from the player instead
                let (dir, speed) = if state.vulnerable {
                    (direction, data.speed)
                } else {
                    (-direction, data.speed * data.resistance)
                };
                move_and_collide(world, entity, dir, speed, dt, obstacles);
            }
            EnemyStatus::Idle => {}
        }

        world.enemies.insert(entity, state);
    }
}
