//! Game world
//!
//! Central container for sprites: the entity allocator plus one component
//! storage per data kind, with convenience spawners for everything the map
//! can produce. Despawns are deferred to the end of the frame so collision
//! scans never iterate over freed slots.

use macroquad::math::{Rect, Vec2};

use super::component::ComponentStorage;
use super::components::{inflate, SpriteKind, TileKind};
use super::entity::{Entity, EntityAllocator};
use super::group::SpriteGroup;
use crate::enemy::EnemyState;
use crate::settings::{MonsterKind, WeaponKind, PLAYER_HITBOX_INSET, TILE_SIZE};

/// Vertical hit-box inset for enemy sprites.
const ENEMY_HITBOX_INSET: f32 = -10.0;

/// All sprites and their components.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,
    despawn_queue: Vec<Entity>,

    /// Draw rectangle in world space.
    pub rects: ComponentStorage<Rect>,
    /// Collision rectangle, usually a vertically inset copy of the draw rect.
    pub hitboxes: ComponentStorage<Rect>,
    /// Closed role tag; every sprite has one.
    pub kinds: ComponentStorage<SpriteKind>,
    /// Mutable state for enemy sprites only.
    pub enemies: ComponentStorage<EnemyState>,
    /// Seconds left before a timed sprite (flame, aura) despawns.
    pub lifetimes: ComponentStorage<f32>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    fn spawn(&mut self, kind: SpriteKind, rect: Rect, hitbox: Rect) -> Entity {
        let entity = self.entities.allocate();
        self.kinds.insert(entity, kind);
        self.rects.insert(entity, rect);
        self.hitboxes.insert(entity, hitbox);
        entity
    }

    /// Queue an entity for removal at the end of the frame.
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.despawn_queue.contains(&entity) {
            self.despawn_queue.push(entity);
        }
    }

    /// Process queued despawns. Call once per frame, after all scans.
    pub fn flush_despawns(&mut self) {
        let queue = std::mem::take(&mut self.despawn_queue);
        for entity in queue {
            if !self.entities.free(entity) {
                continue;
            }
            let idx = entity.index();
            self.rects.clear_slot(idx);
            self.hitboxes.clear_slot(idx);
            self.kinds.clear_slot(idx);
            self.enemies.clear_slot(idx);
            self.lifetimes.clear_slot(idx);
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    // =========================================================================
    // Spawners
    // =========================================================================

    /// Spawn a static tile at a cell's world position.
    pub fn spawn_tile(&mut self, pos: Vec2, kind: TileKind, variant: usize) -> Entity {
        // Scenery images are two tiles tall and anchored one tile up,
        // so the visible part sits on the cell that spawned it.
        let rect = match kind {
            TileKind::Object => Rect::new(pos.x, pos.y - TILE_SIZE, TILE_SIZE, 2.0 * TILE_SIZE),
            _ => Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
        };
        let hitbox = inflate(rect, 0.0, kind.hitbox_inset());
        let sprite = match kind {
            TileKind::Boundary => SpriteKind::Boundary,
            TileKind::Grass => SpriteKind::Grass { variant },
            TileKind::Object => SpriteKind::Object { index: variant },
        };
        self.spawn(sprite, rect, hitbox)
    }

    pub fn spawn_player(&mut self, pos: Vec2) -> Entity {
        let rect = Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE);
        let (dx, dy) = PLAYER_HITBOX_INSET;
        self.spawn(SpriteKind::Player, rect, inflate(rect, dx, dy))
    }

    pub fn spawn_enemy(&mut self, kind: MonsterKind, pos: Vec2) -> Entity {
        let rect = Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE);
        let entity = self.spawn(
            SpriteKind::Enemy(kind),
            rect,
            inflate(rect, 0.0, ENEMY_HITBOX_INSET),
        );
        self.enemies.insert(entity, EnemyState::new(kind));
        entity
    }

    /// Spawn the melee weapon sprite at an explicit rect.
    pub fn spawn_weapon(&mut self, kind: WeaponKind, rect: Rect) -> Entity {
        self.spawn(SpriteKind::Weapon(kind), rect, rect)
    }

    /// Spawn a timed effect sprite (flame projectile, heal aura).
    pub fn spawn_effect(&mut self, kind: SpriteKind, rect: Rect, lifetime: f32) -> Entity {
        let entity = self.spawn(kind, rect, rect);
        self.lifetimes.insert(entity, lifetime);
        entity
    }
}

// =============================================================================
// Movement
// =============================================================================

/// Move an entity's hit-box along `direction`, clamping the step against the
/// obstacle group one axis at a time, then re-center the draw rect on it.
/// Each axis tests the swept extent of its step, so arbitrarily fast movement
/// still stops at the first wall in its path. Axis separation lets sprites
/// slide along walls instead of sticking.
pub fn move_and_collide(
    world: &mut World,
    entity: Entity,
    direction: Vec2,
    speed: f32,
    dt: f32,
    obstacles: &SpriteGroup,
) {
    if direction == Vec2::ZERO {
        return;
    }
    let dir = direction.normalize_or_zero();
    let Some(mut hitbox) = world.hitboxes.get(entity).copied() else {
        return;
    };

    if dir.x != 0.0 {
        let start_x = hitbox.x;
        hitbox.x += dir.x * speed * dt;
        for obstacle in obstacles.iter() {
            if obstacle == entity {
                continue;
            }
            if let Some(wall) = world.hitboxes.get(obstacle) {
                // Test the swept extent of the step, not just the end
                // position, so a large step cannot skip over a wall
                let swept = Rect::new(
                    start_x.min(hitbox.x),
                    hitbox.y,
                    (hitbox.x - start_x).abs() + hitbox.w,
                    hitbox.h,
                );
                if swept.overlaps(wall) {
                    if dir.x > 0.0 {
                        hitbox.x = hitbox.x.min(wall.x - hitbox.w);
                    } else {
                        hitbox.x = hitbox.x.max(wall.x + wall.w);
                    }
                }
            }
        }
    }

    if dir.y != 0.0 {
        let start_y = hitbox.y;
        hitbox.y += dir.y * speed * dt;
        for obstacle in obstacles.iter() {
            if obstacle == entity {
                continue;
            }
            if let Some(wall) = world.hitboxes.get(obstacle) {
                let swept = Rect::new(
                    hitbox.x,
                    start_y.min(hitbox.y),
                    hitbox.w,
                    (hitbox.y - start_y).abs() + hitbox.h,
                );
                if swept.overlaps(wall) {
                    if dir.y > 0.0 {
                        hitbox.y = hitbox.y.min(wall.y - hitbox.h);
                    } else {
                        hitbox.y = hitbox.y.max(wall.y + wall.h);
                    }
                }
            }
        }
    }

    world.hitboxes.insert(entity, hitbox);
    if let Some(rect) = world.rects.get_mut(entity) {
        let center = hitbox.center();
        rect.x = center.x - rect.w / 2.0;
        rect.y = center.y - rect.h / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn despawn_is_deferred_until_flush() {
        let mut world = World::new();
        let grass = world.spawn_tile(vec2(0.0, 0.0), TileKind::Grass, 0);

        world.despawn(grass);
        assert!(world.is_alive(grass));

        world.flush_despawns();
        assert!(!world.is_alive(grass));
        assert!(world.kinds.get(grass).is_none());
    }

    #[test]
    fn object_tile_is_anchored_one_tile_up() {
        let mut world = World::new();
        let object = world.spawn_tile(vec2(64.0, 64.0), TileKind::Object, 2);

        let rect = world.rects.get(object).unwrap();
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.h, 2.0 * TILE_SIZE);
        assert_eq!(world.kinds.get(object), Some(&SpriteKind::Object { index: 2 }));
    }

    #[test]
    fn movement_stops_at_obstacles() {
        let mut world = World::new();
        let mut obstacles = SpriteGroup::new();

        let player = world.spawn_player(vec2(0.0, 0.0));
        let wall = world.spawn_tile(vec2(128.0, 0.0), TileKind::Boundary, 0);
        obstacles.insert(wall);

        // Walk right into the wall for a full second
        move_and_collide(&mut world, player, vec2(1.0, 0.0), 1000.0, 1.0, &obstacles);

        let hitbox = world.hitboxes.get(player).unwrap();
        assert_eq!(hitbox.x + hitbox.w, 128.0);
    }

    #[test]
    fn fast_movement_stops_at_the_first_wall() {
        let mut world = World::new();
        let mut obstacles = SpriteGroup::new();

        let player = world.spawn_player(vec2(0.0, 0.0));
        let near = world.spawn_tile(vec2(128.0, 0.0), TileKind::Boundary, 0);
        let far = world.spawn_tile(vec2(512.0, 0.0), TileKind::Boundary, 0);
        obstacles.insert(far);
        obstacles.insert(near);

        // One step big enough to jump clean over both walls
        move_and_collide(&mut world, player, vec2(1.0, 0.0), 100_000.0, 1.0, &obstacles);

        let hitbox = world.hitboxes.get(player).unwrap();
        assert_eq!(hitbox.x + hitbox.w, 128.0);
    }

    #[test]
    fn free_movement_is_speed_times_dt() {
        let mut world = World::new();
        let obstacles = SpriteGroup::new();
        let player = world.spawn_player(vec2(0.0, 0.0));
        let start = world.hitboxes.get(player).unwrap().x;

        move_and_collide(&mut world, player, vec2(1.0, 0.0), 300.0, 0.5, &obstacles);

        let hitbox = world.hitboxes.get(player).unwrap();
        assert!((hitbox.x - start - 150.0).abs() < 1e-4);
        // Draw rect follows the hit-box center
        let rect = world.rects.get(player).unwrap();
        assert_eq!(rect.center(), hitbox.center());
    }
}
