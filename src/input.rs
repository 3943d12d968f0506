//! Input snapshot
//!
//! The frame loop polls macroquad once per frame into a plain struct; game
//! logic only ever sees the snapshot, which keeps the level and player
//! updates runnable headless in tests.

use macroquad::prelude::*;

/// Everything the game reads from the keyboard in one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Movement direction, components in {-1, 0, 1} (normalized on use).
    pub direction: Vec2,
    /// Swing the melee weapon.
    pub attack: bool,
    /// Cast the selected spell.
    pub magic: bool,
    /// Cycle to the next weapon.
    pub switch_weapon: bool,
    /// Cycle to the next spell.
    pub switch_magic: bool,
    /// Toggle the pause/upgrade menu.
    pub toggle_menu: bool,
    /// Menu navigation.
    pub menu_left: bool,
    pub menu_right: bool,
    pub menu_confirm: bool,
    /// Close the game.
    pub quit: bool,
}

/// Poll the keyboard. WASD and the arrow keys both move.
pub fn poll() -> InputState {
    let mut direction = Vec2::ZERO;
    if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
        direction.y -= 1.0;
    }
    if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
        direction.y += 1.0;
    }
    if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
        direction.x -= 1.0;
    }
    if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
        direction.x += 1.0;
    }

    InputState {
        direction,
        attack: is_key_pressed(KeyCode::Space),
        magic: is_key_pressed(KeyCode::LeftControl),
        switch_weapon: is_key_pressed(KeyCode::Q),
        switch_magic: is_key_pressed(KeyCode::E),
        toggle_menu: is_key_pressed(KeyCode::M),
        menu_left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
        menu_right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
        menu_confirm: is_key_pressed(KeyCode::Space),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
