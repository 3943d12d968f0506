//! Particle effects
//!
//! Decorative bursts (cut grass, hit flashes, death smoke) from a fixed-size
//! pool. Particles are plain colored quads integrated with a little drag and
//! a color lerp over their lifetime; they never collide with anything.

use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};
use macroquad::shapes::draw_rectangle;
use rand::Rng;

use crate::settings::{HitKind, MonsterKind};

/// Maximum number of live particles.
pub const MAX_PARTICLES: usize = 256;

/// One particle slot in the pool.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in seconds.
    pub life: f32,
    pub max_life: f32,
    pub color_start: [u8; 3],
    pub color_end: [u8; 3],
    /// Quad side length in pixels.
    pub size: f32,
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            color_start: [255, 255, 255],
            color_end: [128, 128, 128],
            size: 4.0,
            alive: false,
        }
    }
}

/// Burst tuning: speed range, lifetime range and the color ramp.
#[derive(Debug, Clone, Copy)]
pub struct BurstDef {
    pub speed_min: f32,
    pub speed_max: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub color_start: [u8; 3],
    pub color_end: [u8; 3],
    pub size: f32,
}

impl BurstDef {
    /// Leaves thrown up when grass is cut.
    pub fn leaves() -> Self {
        Self {
            speed_min: 40.0,
            speed_max: 140.0,
            life_min: 0.3,
            life_max: 0.7,
            color_start: [90, 180, 60],
            color_end: [30, 80, 25],
            size: 6.0,
        }
    }

    /// Flash when the player is hit, tinted by the attack flavor.
    pub fn hit(kind: HitKind) -> Self {
        let (color_start, color_end) = match kind {
            HitKind::Slash => ([230, 230, 230], [120, 120, 120]),
            HitKind::Claw => ([220, 120, 60], [110, 50, 20]),
            HitKind::Thunder => ([250, 250, 120], [180, 160, 40]),
            HitKind::Leaf => ([120, 200, 80], [50, 100, 30]),
        };
        Self {
            speed_min: 120.0,
            speed_max: 320.0,
            life_min: 0.15,
            life_max: 0.4,
            color_start,
            color_end,
            size: 5.0,
        }
    }

    /// Smoke puff when an enemy dies.
    pub fn death(kind: MonsterKind) -> Self {
        let color_start = match kind {
            MonsterKind::Bamboo => [150, 200, 120],
            MonsterKind::Spirit => [170, 170, 240],
            MonsterKind::Raccoon => [180, 140, 100],
            MonsterKind::Squid => [140, 120, 180],
        };
        Self {
            speed_min: 30.0,
            speed_max: 110.0,
            life_min: 0.4,
            life_max: 0.9,
            color_start,
            color_end: [70, 70, 70],
            size: 8.0,
        }
    }

    /// Golden sparkle of the heal spell.
    pub fn heal() -> Self {
        Self {
            speed_min: 20.0,
            speed_max: 90.0,
            life_min: 0.3,
            life_max: 0.8,
            color_start: [250, 220, 120],
            color_end: [200, 160, 40],
            size: 5.0,
        }
    }

    /// Embers trailing the flame spell.
    pub fn embers() -> Self {
        Self {
            speed_min: 60.0,
            speed_max: 200.0,
            life_min: 0.2,
            life_max: 0.5,
            color_start: [255, 180, 60],
            color_end: [180, 40, 10],
            size: 5.0,
        }
    }
}

/// Fixed pool of particles. Oldest slots are simply unavailable when full.
pub struct ParticlePool {
    particles: [Particle; MAX_PARTICLES],
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
        }
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn `count` particles radiating from `origin`.
    pub fn spawn_burst(&mut self, def: &BurstDef, origin: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let Some(idx) = self.find_free_slot() else {
                return;
            };
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(def.speed_min..=def.speed_max);
            let life = rng.gen_range(def.life_min..=def.life_max);
            self.particles[idx] = Particle {
                position: origin,
                velocity: vec2(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                color_start: def.color_start,
                color_end: def.color_end,
                size: def.size,
                alive: true,
            };
        }
    }

    /// Integrate all live particles.
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }
            particle.life -= dt;
            if particle.life <= 0.0 {
                particle.alive = false;
                continue;
            }
            // Drag so bursts settle instead of flying off
            particle.velocity *= 1.0 - (2.5 * dt).min(1.0);
            particle.position += particle.velocity * dt;
        }
    }

    /// Draw all live particles, shifted by the camera offset.
    pub fn draw(&self, offset: Vec2) {
        for particle in &self.particles {
            if !particle.alive {
                continue;
            }
            let t = 1.0 - particle.life / particle.max_life;
            let r = lerp_u8(particle.color_start[0], particle.color_end[0], t);
            let g = lerp_u8(particle.color_start[1], particle.color_end[1], t);
            let b = lerp_u8(particle.color_start[2], particle.color_end[2], t);
            let pos = particle.position - offset;
            draw_rectangle(
                pos.x - particle.size / 2.0,
                pos.y - particle.size / 2.0,
                particle.size,
                particle.size,
                Color::from_rgba(r, g, b, 255),
            );
        }
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}
