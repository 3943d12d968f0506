//! On-screen interface
//!
//! The HUD (bars, exp counter, weapon and magic boxes) draws every frame;
//! the upgrade menu only while the level is paused. Both are immediate-mode,
//! plain macroquad shapes and text.

pub mod hud;
pub mod upgrade;

pub use hud::draw_hud;
pub use upgrade::UpgradeMenu;

use macroquad::prelude::*;

pub(crate) const UI_FONT_SIZE: f32 = 20.0;
pub(crate) const UI_BG_COLOR: Color = Color::new(0.13, 0.13, 0.13, 0.9);
pub(crate) const UI_BORDER_COLOR: Color = Color::new(0.07, 0.07, 0.07, 1.0);
pub(crate) const UI_BORDER_ACTIVE: Color = GOLD;
pub(crate) const TEXT_COLOR: Color = Color::new(0.93, 0.93, 0.93, 1.0);

/// Background panel with a border, highlighted when active.
pub(crate) fn draw_box(rect: Rect, active: bool) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, UI_BG_COLOR);
    let border = if active { UI_BORDER_ACTIVE } else { UI_BORDER_COLOR };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, border);
}
