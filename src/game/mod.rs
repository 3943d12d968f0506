//! Gameplay Foundation
//!
//! A small ECS-inspired layer the level logic is built on:
//! - Entity: generational index so stale references never hit a reused slot
//! - ComponentStorage: sparse per-entity data arrays
//! - SpriteGroup: set-like membership used for rendering and collision scopes
//! - Events: decoupled queues drained once per frame by the level
//!
//! Behavior lives in the level/player/enemy modules; this layer only stores
//! and routes data.

pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod group;
pub mod world;

pub use components::{SpriteKind, TileKind};
pub use entity::Entity;
pub use event::Events;
pub use group::SpriteGroup;
pub use world::World;
