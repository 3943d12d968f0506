//! Emberleaf: a small top-down action adventure.
//!
//! The frame loop polls input, advances the level, then draws the scene,
//! the HUD and (while paused) the upgrade menu. All simulation lives in
//! `level`; this file only wires the window, assets and audio together.

use std::path::Path;

use macroquad::audio::{play_sound, play_sound_once, PlaySoundParams};
use macroquad::prelude::*;

mod assets;
mod camera;
mod config;
mod enemy;
mod game;
mod input;
mod level;
mod map;
mod particles;
mod player;
mod settings;
mod ui;

use assets::Assets;
use config::GameConfig;
use level::Level;
use map::MapLayers;
use settings::{MagicKind, VIEW_HEIGHT, VIEW_WIDTH, WATER_COLOR};

const CONFIG_PATH: &str = "config.ron";

fn window_conf() -> Conf {
    let config = GameConfig::load(Path::new(CONFIG_PATH)).unwrap_or_default();
    Conf {
        window_title: "Emberleaf".to_string(),
        window_width: VIEW_WIDTH as i32,
        window_height: VIEW_HEIGHT as i32,
        fullscreen: config.fullscreen,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match GameConfig::load(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("config: {} (using defaults)", e);
            GameConfig::default()
        }
    };

    let layers = match MapLayers::load(&config.map_dir) {
        Ok(layers) => layers,
        Err(e) => {
            eprintln!("failed to load map from {:?}: {}", config.map_dir, e);
            return;
        }
    };
    let mut level = match Level::from_layers(&layers) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("failed to build level: {}", e);
            return;
        }
    };
    let assets = match Assets::load(&config.asset_dir).await {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("failed to load assets from {:?}: {}", config.asset_dir, e);
            return;
        }
    };
    println!("level ready: {} sprites", level.world.entity_count());

    play_sound(
        &assets.music,
        PlaySoundParams { looped: true, volume: config.music_volume },
    );

    let min_frame_time = 1.0 / config.fps_cap.max(1) as f64;
    loop {
        let frame_start = get_time();
        let input = input::poll();
        if input.quit {
            break;
        }

        let alive = !level.player.is_dead();
        if alive {
            level.update(&input, get_frame_time());

            // Sounds follow what the update actually did, not the raw input
            if level.audio.weapon_swung {
                play_sound_once(&assets.sword_sound);
            }
            if let Some(kind) = level.audio.magic_cast {
                let sound = match kind {
                    MagicKind::Heal => &assets.heal_sound,
                    MagicKind::Flame => &assets.flame_sound,
                };
                play_sound_once(sound);
            }
            if level.audio.enemy_died {
                play_sound_once(&assets.death_sound);
            }
            if level.audio.player_hurt {
                play_sound_once(&assets.hit_sound);
            }
        }

        clear_background(WATER_COLOR);
        camera::draw_scene(&level, &assets);
        ui::draw_hud(&level.player, &assets);
        if level.paused {
            level.upgrade.draw(&level.player);
        }
        if !alive {
            draw_game_over();
        }

        // Frame cap: burn off the remainder of the frame budget
        let elapsed = get_time() - frame_start;
        if elapsed < min_frame_time {
            std::thread::sleep(std::time::Duration::from_secs_f64(min_frame_time - elapsed));
        }
        next_frame().await;
    }
}

fn draw_game_over() {
    draw_rectangle(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.6));
    let text = "You died";
    let size = measure_text(text, None, 64, 1.0);
    draw_text(
        text,
        (VIEW_WIDTH - size.width) / 2.0,
        VIEW_HEIGHT / 2.0,
        64.0,
        WHITE,
    );
}
