//! Asset loading
//!
//! Every texture and sound is loaded up front, before the first frame.
//! Variant folders (grass, objects) are read in filename order so map codes
//! stay stable between runs.

use std::path::{Path, PathBuf};

use macroquad::audio::{load_sound, Sound};
use macroquad::prelude::*;

use crate::game::SpriteKind;
use crate::settings::{MagicKind, WeaponKind};

/// Error type for asset loading.
#[derive(Debug)]
pub enum AssetError {
    Io(std::io::Error),
    /// macroquad failed to decode or fetch a file.
    Load { path: String, source: macroquad::Error },
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(e) => write!(f, "IO error: {}", e),
            AssetError::Load { path, source } => write!(f, "failed to load {:?}: {}", path, source),
        }
    }
}

impl std::error::Error for AssetError {}

/// All textures and sounds, loaded once at startup.
pub struct Assets {
    /// The big pre-rendered ground image the map sits on.
    pub floor: Texture2D,
    pub player: Texture2D,
    grass: Vec<Texture2D>,
    objects: Vec<Texture2D>,
    monsters: [Texture2D; 4],
    weapons: [Texture2D; 5],
    magics: [Texture2D; 2],
    flame: Texture2D,
    aura: Texture2D,

    pub music: Sound,
    pub sword_sound: Sound,
    pub heal_sound: Sound,
    pub flame_sound: Sound,
    pub death_sound: Sound,
    pub hit_sound: Sound,
}

impl Assets {
    /// Load everything from the asset root (`graphics/` and `audio/` under it).
    pub async fn load(root: &Path) -> Result<Self, AssetError> {
        let gfx = root.join("graphics");
        let audio = root.join("audio");

        let monsters = [
            texture(&gfx.join("monsters/bamboo.png")).await?,
            texture(&gfx.join("monsters/spirit.png")).await?,
            texture(&gfx.join("monsters/raccoon.png")).await?,
            texture(&gfx.join("monsters/squid.png")).await?,
        ];
        let weapons = [
            texture(&gfx.join("weapons/sword.png")).await?,
            texture(&gfx.join("weapons/lance.png")).await?,
            texture(&gfx.join("weapons/axe.png")).await?,
            texture(&gfx.join("weapons/rapier.png")).await?,
            texture(&gfx.join("weapons/sai.png")).await?,
        ];
        let magics = [
            texture(&gfx.join("magic/heal.png")).await?,
            texture(&gfx.join("magic/flame.png")).await?,
        ];

        Ok(Self {
            floor: texture(&gfx.join("tilemap/ground.png")).await?,
            player: texture(&gfx.join("player/down.png")).await?,
            grass: texture_folder(&gfx.join("grass")).await?,
            objects: texture_folder(&gfx.join("objects")).await?,
            monsters,
            weapons,
            magics,
            flame: texture(&gfx.join("magic/flame_particle.png")).await?,
            aura: texture(&gfx.join("magic/aura.png")).await?,
            music: sound(&audio.join("main.ogg")).await?,
            sword_sound: sound(&audio.join("sword.wav")).await?,
            heal_sound: sound(&audio.join("heal.wav")).await?,
            flame_sound: sound(&audio.join("flame.wav")).await?,
            death_sound: sound(&audio.join("death.wav")).await?,
            hit_sound: sound(&audio.join("hit.wav")).await?,
        })
    }

    /// Texture for one sprite. Boundaries are invisible collision blocks.
    pub fn texture_for(&self, kind: SpriteKind) -> Option<&Texture2D> {
        match kind {
            SpriteKind::Boundary => None,
            SpriteKind::Grass { variant } => {
                self.grass.get(variant % self.grass.len().max(1))
            }
            SpriteKind::Object { index } => self.objects.get(index),
            SpriteKind::Player => Some(&self.player),
            SpriteKind::Enemy(kind) => Some(&self.monsters[kind as usize]),
            SpriteKind::Weapon(kind) => Some(&self.weapons[kind as usize]),
            SpriteKind::Flame => Some(&self.flame),
            SpriteKind::HealAura => Some(&self.aura),
        }
    }

    pub fn weapon_icon(&self, kind: WeaponKind) -> Option<&Texture2D> {
        self.weapons.get(kind as usize)
    }

    pub fn magic_icon(&self, kind: MagicKind) -> Option<&Texture2D> {
        self.magics.get(kind as usize)
    }

    pub fn grass_variant_count(&self) -> usize {
        self.grass.len()
    }
}

async fn texture(path: &Path) -> Result<Texture2D, AssetError> {
    let path_str = path.to_string_lossy().into_owned();
    let texture = load_texture(&path_str).await.map_err(|source| AssetError::Load {
        path: path_str,
        source,
    })?;
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

async fn sound(path: &Path) -> Result<Sound, AssetError> {
    let path_str = path.to_string_lossy().into_owned();
    load_sound(&path_str).await.map_err(|source| AssetError::Load {
        path: path_str,
        source,
    })
}

/// Load every image in a directory, sorted by filename.
async fn texture_folder(dir: &Path) -> Result<Vec<Texture2D>, AssetError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut textures = Vec::with_capacity(paths.len());
    for path in paths {
        textures.push(texture(&path).await?);
    }
    Ok(textures)
}
