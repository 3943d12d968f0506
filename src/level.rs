//! Level composition and the per-frame update
//!
//! The level owns the sprite world, the four groups, the player state and
//! the event queues. It builds everything from the map layers, then drives
//! each frame: player update, enemy updates, one event-processing step,
//! the attack collision scan, and end-of-frame cleanup.

use macroquad::math::{vec2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::enemy::{damage_enemy, update_enemies};
use crate::game::{Entity, Events, SpriteGroup, SpriteKind, TileKind, World};
use crate::input::InputState;
use crate::map::{MapLayers, EMPTY_CELL};
use crate::particles::{BurstDef, ParticlePool};
use crate::player::{PlayerState, Stat};
use crate::settings::*;
use crate::ui::UpgradeMenu;

/// Vertical offset for leaf particles above a destroyed grass tile.
const GRASS_PARTICLE_LIFT: f32 = 75.0;
/// Particles in an enemy death burst.
const DEATH_BURST_COUNT: usize = 12;
/// Particles in a player hit flash.
const HIT_BURST_COUNT: usize = 6;

/// Error type for level construction.
#[derive(Debug)]
pub enum LevelError {
    Map(crate::map::MapError),
    /// The entity layer has no player-start cell.
    NoPlayerStart,
    /// The entity layer has more than one player-start cell.
    MultiplePlayerStarts(usize),
}

impl From<crate::map::MapError> for LevelError {
    fn from(e: crate::map::MapError) -> Self {
        LevelError::Map(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Map(e) => write!(f, "map error: {}", e),
            LevelError::NoPlayerStart => write!(f, "entity layer has no player start cell"),
            LevelError::MultiplePlayerStarts(n) => {
                write!(f, "entity layer has {} player start cells, expected 1", n)
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Which audible actions actually happened in the last update. The frame
/// loop keys sound effects off these instead of raw input, so rejected
/// actions (mid-swing, empty energy gauge) stay silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameAudio {
    pub weapon_swung: bool,
    pub magic_cast: Option<MagicKind>,
    pub enemy_died: bool,
    pub player_hurt: bool,
}

/// All state for one running map.
pub struct Level {
    pub world: World,
    pub events: Events,

    /// Everything the camera draws, y-sorted.
    pub visible: SpriteGroup,
    /// What movement collides with.
    pub obstacles: SpriteGroup,
    /// What player attacks can hit.
    pub attackable: SpriteGroup,
    /// Active attack sprites (weapon, flames).
    pub attacks: SpriteGroup,

    pub player: PlayerState,
    player_entity: Entity,
    /// The single melee weapon slot. Only `spawn_weapon`/`clear_weapon`
    /// touch it.
    current_weapon: Option<Entity>,
    /// Timed effect sprites (flames, heal aura) awaiting expiry.
    timed_effects: Vec<Entity>,

    pub particles: ParticlePool,
    pub upgrade: UpgradeMenu,
    pub paused: bool,
    pub audio: FrameAudio,

    /// Level-local wall clock, advanced by `update`.
    clock: f64,
    rng: StdRng,
}

impl Level {
    /// Build a level from parsed map layers. Fails fast if the entity layer
    /// does not define exactly one player start.
    pub fn from_layers(layers: &MapLayers) -> Result<Self, LevelError> {
        let mut level = Self {
            world: World::new(),
            events: Events::new(),
            visible: SpriteGroup::new(),
            obstacles: SpriteGroup::new(),
            attackable: SpriteGroup::new(),
            attacks: SpriteGroup::new(),
            player: PlayerState::new(),
            player_entity: Entity::new(0, 0),
            current_weapon: None,
            timed_effects: Vec::new(),
            particles: ParticlePool::new(),
            upgrade: UpgradeMenu::new(),
            paused: false,
            audio: FrameAudio::default(),
            clock: 0.0,
            rng: StdRng::from_entropy(),
        };
        level.build_map(layers)?;
        Ok(level)
    }

    fn build_map(&mut self, layers: &MapLayers) -> Result<(), LevelError> {
        for_each_cell(&layers.boundary, |pos, _| {
            let tile = self.world.spawn_tile(pos, TileKind::Boundary, 0);
            self.obstacles.insert(tile);
        });

        for_each_cell(&layers.grass, |pos, _| {
            let variant = self.rng.gen_range(0..GRASS_VARIANT_COUNT);
            let tile = self.world.spawn_tile(pos, TileKind::Grass, variant);
            self.visible.insert(tile);
            self.obstacles.insert(tile);
            self.attackable.insert(tile);
        });

        for_each_cell(&layers.objects, |pos, code| {
            let tile = self.world.spawn_tile(pos, TileKind::Object, code.max(0) as usize);
            self.visible.insert(tile);
            self.obstacles.insert(tile);
        });

        let mut player_cells = Vec::new();
        for_each_cell(&layers.entities, |pos, code| {
            if code == PLAYER_START_CODE {
                player_cells.push(pos);
            } else {
                let enemy = self.world.spawn_enemy(MonsterKind::from_code(code), pos);
                self.visible.insert(enemy);
                self.attackable.insert(enemy);
            }
        });

        match player_cells.len() {
            0 => Err(LevelError::NoPlayerStart),
            1 => {
                self.player_entity = self.world.spawn_player(player_cells[0]);
                self.visible.insert(self.player_entity);
                Ok(())
            }
            n => Err(LevelError::MultiplePlayerStarts(n)),
        }
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Advance one frame. While paused only the upgrade menu runs.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        self.clock += dt as f64;
        self.audio = FrameAudio::default();

        if input.toggle_menu {
            self.paused = !self.paused;
        }
        if self.paused {
            self.upgrade.handle_input(input, &mut self.player);
            return;
        }

        self.player.update(
            input,
            self.clock,
            dt,
            &mut self.world,
            self.player_entity,
            &self.obstacles,
            &mut self.events,
        );
        let player_center = self.player_center();
        update_enemies(
            &mut self.world,
            &self.visible,
            &self.obstacles,
            player_center,
            &mut self.events,
            self.clock,
            dt,
        );
        self.process_events();
        self.player_attack_logic();
        self.tick_effects(dt);
        self.particles.update(dt);

        self.world.flush_despawns();
        let world = &self.world;
        for group in [
            &mut self.visible,
            &mut self.obstacles,
            &mut self.attackable,
            &mut self.attacks,
        ] {
            group.retain(|e| world.is_alive(*e));
        }
    }

    /// Drain every event queue in one place. This is the only spot where
    /// player/enemy actions turn into world mutations.
    fn process_events(&mut self) {
        let swings = self.events.weapon_swing.drain().count();
        for _ in 0..swings {
            self.spawn_weapon();
        }

        let recalls = self.events.weapon_recall.drain().count();
        for _ in 0..recalls {
            self.clear_weapon();
        }

        let casts: Vec<_> = self.events.magic.drain().collect();
        for cast in casts {
            self.create_magic(cast.kind);
        }

        let hits: Vec<_> = self.events.player_hit.drain().collect();
        for hit in hits {
            self.damage_player(hit.amount, hit.attack);
        }

        let bursts: Vec<_> = self.events.death_burst.drain().collect();
        self.audio.enemy_died = !bursts.is_empty();
        for burst in bursts {
            self.particles.spawn_burst(
                &BurstDef::death(burst.kind),
                burst.position,
                DEATH_BURST_COUNT,
                &mut self.rng,
            );
        }

        let gains: Vec<_> = self.events.exp_gain.drain().collect();
        for gain in gains {
            self.player.exp += gain.amount;
        }
    }

    // =========================================================================
    // Combat
    // =========================================================================

    /// Rectangle-overlap scan of every active attack sprite against every
    /// attackable sprite. Sprite counts are small; a linear scan is fine.
    fn player_attack_logic(&mut self) {
        if self.attacks.is_empty() {
            return;
        }
        let attacks: Vec<Entity> = self.attacks.iter().collect();
        let targets: Vec<Entity> = self.attackable.iter().collect();

        for attack in attacks {
            let Some(attack_rect) = self.world.hitboxes.get(attack).copied() else {
                continue;
            };
            let Some(attack_kind) = self.world.kinds.get(attack).copied() else {
                continue;
            };
            for target in &targets {
                let target = *target;
                // Destruction removes membership eagerly; despawns only
                // flush at end of frame, so liveness is the wrong guard here
                if !self.attackable.contains(target) {
                    continue;
                }
                let Some(target_hitbox) = self.world.hitboxes.get(target).copied() else {
                    continue;
                };
                if !attack_rect.overlaps(&target_hitbox) {
                    continue;
                }

                let kind = self.world.kinds.get(target).copied();
                if kind.is_some_and(SpriteKind::is_grass) {
                    self.destroy_grass(target);
                } else {
                    let amount = self.player.stat(Stat::Attack) + attack_damage(attack_kind);
                    damage_enemy(&mut self.world, target, amount, self.clock);
                }
            }
        }
    }

    /// Remove a grass tile from every group and throw leaves up from it.
    fn destroy_grass(&mut self, grass: Entity) {
        if let Some(rect) = self.world.rects.get(grass) {
            let origin = rect.center() - vec2(0.0, GRASS_PARTICLE_LIFT);
            let count = self.rng.gen_range(3..=6);
            self.particles
                .spawn_burst(&BurstDef::leaves(), origin, count, &mut self.rng);
        }
        self.visible.remove(grass);
        self.obstacles.remove(grass);
        self.attackable.remove(grass);
        self.world.despawn(grass);
    }

    /// Apply enemy damage to the player. The vulnerability flag is the only
    /// gate against repeated hits within one window.
    fn damage_player(&mut self, amount: f32, attack: HitKind) {
        if !self.player.vulnerable {
            return;
        }
        self.player.health -= amount;
        self.player.vulnerable = false;
        self.player.hurt_time = self.clock;
        self.audio.player_hurt = true;
        let center = self.player_center();
        self.particles
            .spawn_burst(&BurstDef::hit(attack), center, HIT_BURST_COUNT, &mut self.rng);
    }

    /// Dispatch a spell cast. Heal affects only the caster and joins the
    /// visible group; flame joins the attack group too so the collision
    /// scan sees it.
    fn create_magic(&mut self, kind: MagicKind) {
        let data = kind.data();
        if self.player.energy < data.cost {
            return;
        }
        self.audio.magic_cast = Some(kind);

        match kind {
            MagicKind::Heal => {
                self.player.energy -= data.cost;
                let heal = data.strength + self.player.stat(Stat::Magic);
                self.player.health = (self.player.health + heal).min(self.player.stat(Stat::Health));

                let rect = match self.world.rects.get(self.player_entity) {
                    Some(r) => *r,
                    None => return,
                };
                let aura = self.world.spawn_effect(SpriteKind::HealAura, rect, AURA_LIFETIME);
                self.visible.insert(aura);
                self.timed_effects.push(aura);
                self.particles
                    .spawn_burst(&BurstDef::heal(), rect.center(), 8, &mut self.rng);
            }
            MagicKind::Flame => {
                self.player.energy -= data.cost;
                let center = self.player_center();
                let facing = self.player.facing;
                for step in 1..=FLAME_COUNT {
                    let pos = center + facing * TILE_SIZE * step as f32;
                    let rect = Rect::new(
                        pos.x - TILE_SIZE / 2.0,
                        pos.y - TILE_SIZE / 2.0,
                        TILE_SIZE,
                        TILE_SIZE,
                    );
                    let flame = self.world.spawn_effect(SpriteKind::Flame, rect, FLAME_LIFETIME);
                    self.visible.insert(flame);
                    self.attacks.insert(flame);
                    self.timed_effects.push(flame);
                    self.particles
                        .spawn_burst(&BurstDef::embers(), pos, 4, &mut self.rng);
                }
            }
        }
    }

    // =========================================================================
    // Weapon slot
    // =========================================================================

    /// Swing start: place the weapon sprite next to the player. Replaces any
    /// weapon still out.
    fn spawn_weapon(&mut self) {
        self.clear_weapon();
        let Some(hitbox) = self.world.hitboxes.get(self.player_entity).copied() else {
            return;
        };
        let rect = weapon_rect(self.player.facing, hitbox);
        let weapon = self.world.spawn_weapon(self.player.weapon, rect);
        self.visible.insert(weapon);
        self.attacks.insert(weapon);
        self.current_weapon = Some(weapon);
        self.audio.weapon_swung = true;
    }

    /// Swing end: drop the weapon sprite.
    fn clear_weapon(&mut self) {
        if let Some(weapon) = self.current_weapon.take() {
            self.visible.remove(weapon);
            self.attacks.remove(weapon);
            self.world.despawn(weapon);
        }
    }

    // =========================================================================
    // Effects & accessors
    // =========================================================================

    fn tick_effects(&mut self, dt: f32) {
        let world = &mut self.world;
        let mut expired = Vec::new();
        self.timed_effects.retain(|&effect| {
            match world.lifetimes.get_mut(effect) {
                Some(ttl) => {
                    *ttl -= dt;
                    if *ttl <= 0.0 {
                        expired.push(effect);
                        false
                    } else {
                        true
                    }
                }
                None => false,
            }
        });
        for effect in expired {
            self.visible.remove(effect);
            self.attacks.remove(effect);
            self.world.despawn(effect);
        }
    }

    pub fn toggle_menu(&mut self) {
        self.paused = !self.paused;
    }

    pub fn player_entity(&self) -> Entity {
        self.player_entity
    }

    pub fn current_weapon(&self) -> Option<Entity> {
        self.current_weapon
    }

    /// Center of the player's draw rect; the camera pins this to the screen
    /// center.
    pub fn player_center(&self) -> Vec2 {
        self.world
            .rects
            .get(self.player_entity)
            .map(|r| r.center())
            .unwrap_or(Vec2::ZERO)
    }

}

/// Visit every non-empty cell of a layout with its world position.
fn for_each_cell(layout: &[Vec<i32>], mut visit: impl FnMut(Vec2, i32)) {
    for (row_index, row) in layout.iter().enumerate() {
        for (col_index, &code) in row.iter().enumerate() {
            if code != EMPTY_CELL {
                let pos = vec2(col_index as f32 * TILE_SIZE, row_index as f32 * TILE_SIZE);
                visit(pos, code);
            }
        }
    }
}

/// Damage contributed by an attack sprite, by its role.
fn attack_damage(kind: SpriteKind) -> f32 {
    match kind {
        SpriteKind::Weapon(weapon) => weapon.data().damage,
        SpriteKind::Flame => MagicKind::Flame.data().strength,
        _ => 0.0,
    }
}

/// Place the weapon rect against the player's hit-box along the facing axis.
fn weapon_rect(facing: Vec2, player_hitbox: Rect) -> Rect {
    let center = player_hitbox.center();
    if facing.x.abs() >= facing.y.abs() {
        let (w, h) = (48.0, 20.0);
        let x = if facing.x >= 0.0 {
            player_hitbox.x + player_hitbox.w
        } else {
            player_hitbox.x - w
        };
        Rect::new(x, center.y - h / 2.0, w, h)
    } else {
        let (w, h) = (20.0, 48.0);
        let y = if facing.y >= 0.0 {
            player_hitbox.y + player_hitbox.h
        } else {
            player_hitbox.y - h
        };
        Rect::new(center.x - w / 2.0, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::parse_layout;

    const DT: f32 = 1.0 / 60.0;

    /// A 5x5 map: border boundaries, one grass, one object, the player in
    /// the middle with a bamboo enemy next to it.
    fn test_layers() -> MapLayers {
        let boundary = parse_layout(
            "395,395,395,395,395\n\
             395,-1,-1,-1,395\n\
             395,-1,-1,-1,395\n\
             395,-1,-1,-1,395\n\
             395,395,395,395,395\n",
        )
        .unwrap();
        let grass = parse_layout(
            "-1,-1,-1,-1,-1\n\
             -1,8,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n",
        )
        .unwrap();
        let objects = parse_layout(
            "-1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,-1,2,-1\n\
             -1,-1,-1,-1,-1\n",
        )
        .unwrap();
        let entities = parse_layout(
            "-1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,394,390,-1\n\
             -1,-1,-1,-1,-1\n\
             -1,-1,-1,-1,-1\n",
        )
        .unwrap();
        MapLayers::from_layouts(boundary, grass, objects, entities).unwrap()
    }

    fn test_level() -> Level {
        Level::from_layers(&test_layers()).unwrap()
    }

    fn entities_of_kind(level: &Level, pred: impl Fn(SpriteKind) -> bool) -> Vec<Entity> {
        level
            .visible
            .iter()
            .filter(|e| level.world.kinds.get(*e).copied().is_some_and(&pred))
            .collect()
    }

    #[test]
    fn map_spawns_one_player_and_one_bamboo() {
        let level = test_level();

        let players = entities_of_kind(&level, |k| k == SpriteKind::Player);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0], level.player_entity());

        let enemies = entities_of_kind(&level, SpriteKind::is_enemy);
        assert_eq!(enemies.len(), 1);
        assert_eq!(
            level.world.kinds.get(enemies[0]),
            Some(&SpriteKind::Enemy(MonsterKind::Bamboo))
        );
        assert!(level.attackable.contains(enemies[0]));
        // Player position is (col, row) * tile size
        let rect = level.world.rects.get(players[0]).unwrap();
        assert_eq!((rect.x, rect.y), (2.0 * TILE_SIZE, 2.0 * TILE_SIZE));
    }

    #[test]
    fn map_without_player_start_fails_fast() {
        let empty = parse_layout("-1,-1\n-1,-1\n").unwrap();
        let layers = MapLayers::from_layouts(empty.clone(), empty.clone(), empty.clone(), empty)
            .unwrap();
        assert!(matches!(Level::from_layers(&layers), Err(LevelError::NoPlayerStart)));
    }

    #[test]
    fn map_with_two_player_starts_fails_fast() {
        let empty = parse_layout("-1,-1\n-1,-1\n").unwrap();
        let entities = parse_layout("394,-1\n-1,394\n").unwrap();
        let layers = MapLayers::from_layouts(empty.clone(), empty.clone(), empty, entities).unwrap();
        assert!(matches!(
            Level::from_layers(&layers),
            Err(LevelError::MultiplePlayerStarts(2))
        ));
    }

    #[test]
    fn grass_joins_all_three_groups() {
        let level = test_level();
        let grass = entities_of_kind(&level, SpriteKind::is_grass);
        assert_eq!(grass.len(), 1);
        assert!(level.obstacles.contains(grass[0]));
        assert!(level.attackable.contains(grass[0]));
    }

    #[test]
    fn swing_spawns_one_weapon_then_recall_clears_it() {
        let mut level = test_level();
        let attack_input = InputState { attack: true, ..InputState::default() };

        level.update(&attack_input, DT);
        let weapon = level.current_weapon().expect("weapon out after swing");
        assert!(level.visible.contains(weapon));
        assert!(level.attacks.contains(weapon));

        // A second swing replaces rather than duplicates
        let idle = InputState::default();
        for _ in 0..120 {
            level.update(&idle, DT);
        }
        assert!(level.current_weapon().is_none());
        assert!(level.attacks.is_empty());
        assert!(!level.world.is_alive(weapon));
    }

    #[test]
    fn flame_joins_visible_and_attacks_heal_joins_visible_only() {
        let mut level = test_level();
        level.player.magic = MagicKind::Flame;
        let cast = InputState { magic: true, ..InputState::default() };
        level.update(&cast, DT);

        let flames = entities_of_kind(&level, |k| k == SpriteKind::Flame);
        assert_eq!(flames.len() as u32, FLAME_COUNT);
        for flame in &flames {
            assert!(level.attacks.contains(*flame));
        }

        // Let the cast finish, then heal
        let idle = InputState::default();
        for _ in 0..40 {
            level.update(&idle, DT);
        }
        level.player.magic = MagicKind::Heal;
        level.update(&cast, DT);

        let auras = entities_of_kind(&level, |k| k == SpriteKind::HealAura);
        assert_eq!(auras.len(), 1);
        assert!(level.visible.contains(auras[0]));
        assert!(!level.attacks.contains(auras[0]));
    }

    #[test]
    fn magic_is_a_no_op_without_energy() {
        let mut level = test_level();
        level.player.magic = MagicKind::Flame;
        level.player.energy = 0.0;

        let cast = InputState { magic: true, ..InputState::default() };
        level.update(&cast, DT);
        assert!(entities_of_kind(&level, |k| k == SpriteKind::Flame).is_empty());
        // Only passive recovery moved the gauge; nothing was spent
        assert!(level.player.energy < 1.0);
        assert!(level.audio.magic_cast.is_none());
    }

    #[test]
    fn heal_spends_energy_and_restores_health() {
        let mut level = test_level();
        level.player.health = 50.0;
        let energy_before = level.player.energy;

        let cast = InputState { magic: true, ..InputState::default() };
        level.update(&cast, DT);

        let expected = 50.0 + MagicKind::Heal.data().strength + level.player.stat(Stat::Magic);
        assert!((level.player.health - expected).abs() < 1e-3);
        assert!(level.player.energy < energy_before);
        assert!(matches!(level.audio.magic_cast, Some(MagicKind::Heal)));
    }

    #[test]
    fn destroyed_grass_leaves_every_group_and_later_scans() {
        let mut level = test_level();
        let grass = entities_of_kind(&level, SpriteKind::is_grass)[0];

        // Plant an attack sprite right on the grass
        let rect = *level.world.rects.get(grass).unwrap();
        let weapon = level.world.spawn_weapon(WeaponKind::Sword, rect);
        level.attacks.insert(weapon);

        level.player_attack_logic();
        assert!(!level.visible.contains(grass));
        assert!(!level.obstacles.contains(grass));
        assert!(!level.attackable.contains(grass));
        // Leaves were thrown
        assert!(level.particles.alive_count() >= 3);
        assert!(level.particles.alive_count() <= 6);

        level.world.flush_despawns();
        assert!(!level.world.is_alive(grass));
        // A second scan sees nothing to hit
        level.player_attack_logic();
    }

    #[test]
    fn overlapping_attacks_destroy_grass_only_once() {
        let mut level = test_level();
        let grass = entities_of_kind(&level, SpriteKind::is_grass)[0];
        let rect = *level.world.rects.get(grass).unwrap();

        // Two attack sprites on the same tile, like adjacent flames
        let first = level.world.spawn_weapon(WeaponKind::Sword, rect);
        let second = level.world.spawn_weapon(WeaponKind::Sai, rect);
        level.attacks.insert(first);
        level.attacks.insert(second);

        level.player_attack_logic();
        assert!(!level.attackable.contains(grass));
        // A single leaf burst, not one per attack sprite
        assert!(level.particles.alive_count() >= 3);
        assert!(level.particles.alive_count() <= 6);
    }

    #[test]
    fn attack_scan_damages_enemy_with_weapon_damage() {
        let mut level = test_level();
        let enemy = entities_of_kind(&level, SpriteKind::is_enemy)[0];
        let start = level.world.enemies.get(enemy).unwrap().health;

        let rect = *level.world.rects.get(enemy).unwrap();
        let weapon = level.world.spawn_weapon(WeaponKind::Sword, rect);
        level.attacks.insert(weapon);
        level.player_attack_logic();

        let expected = start
            - (level.player.stat(Stat::Attack) + WeaponKind::Sword.data().damage);
        assert!((level.world.enemies.get(enemy).unwrap().health - expected).abs() < 1e-3);
    }

    #[test]
    fn damage_player_honors_vulnerability() {
        let mut level = test_level();
        level.player.vulnerable = false;
        level.damage_player(10.0, HitKind::Slash);
        assert_eq!(level.player.health, PLAYER_HEALTH);

        level.player.vulnerable = true;
        level.damage_player(10.0, HitKind::Slash);
        assert_eq!(level.player.health, PLAYER_HEALTH - 10.0);
        assert!(!level.player.vulnerable);

        // Second application inside the window does nothing
        level.damage_player(10.0, HitKind::Slash);
        assert_eq!(level.player.health, PLAYER_HEALTH - 10.0);
    }

    #[test]
    fn audio_flags_follow_outcomes_not_input() {
        let mut level = test_level();
        let attack = InputState { attack: true, ..InputState::default() };

        level.update(&attack, DT);
        assert!(level.audio.weapon_swung);

        // Held attack mid-swing is rejected and stays silent
        level.update(&attack, DT);
        assert!(!level.audio.weapon_swung);
        assert!(level.audio.magic_cast.is_none());
    }

    #[test]
    fn pause_suspends_world_updates() {
        let mut level = test_level();
        let toggle = InputState { toggle_menu: true, ..InputState::default() };
        level.update(&toggle, DT);
        assert!(level.paused);

        // Attacks do nothing while the menu is up
        let attack = InputState { attack: true, ..InputState::default() };
        level.update(&attack, DT);
        assert!(level.current_weapon().is_none());

        level.update(&toggle, DT);
        assert!(!level.paused);
    }

    #[test]
    fn upgrade_purchase_through_menu_input() {
        let mut level = test_level();
        level.player.exp = 500.0;
        level.toggle_menu();

        let confirm = InputState { menu_confirm: true, ..InputState::default() };
        level.update(&confirm, DT);
        // First column is health
        assert!(level.player.stat(Stat::Health) > PLAYER_HEALTH);
        assert_eq!(level.player.exp, 500.0 - UPGRADE_BASE_COST);
    }

    #[test]
    fn weapon_rect_sits_beside_the_player() {
        let hitbox = Rect::new(100.0, 100.0, 58.0, 38.0);

        let right = weapon_rect(vec2(1.0, 0.0), hitbox);
        assert_eq!(right.x, hitbox.x + hitbox.w);

        let left = weapon_rect(vec2(-1.0, 0.0), hitbox);
        assert_eq!(left.x + left.w, hitbox.x);

        let down = weapon_rect(vec2(0.0, 1.0), hitbox);
        assert_eq!(down.y, hitbox.y + hitbox.h);

        let up = weapon_rect(vec2(0.0, -1.0), hitbox);
        assert_eq!(up.y + up.h, hitbox.y);
    }
}
