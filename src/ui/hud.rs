//! Heads-up display
//!
//! Health and energy bars in the top-left corner, the exp counter bottom
//! right, and the selected weapon and spell in boxes bottom left.

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::player::{PlayerState, Stat};
use crate::settings::{VIEW_HEIGHT, VIEW_WIDTH};

use super::{draw_box, TEXT_COLOR, UI_FONT_SIZE};

const BAR_HEIGHT: f32 = 20.0;
const HEALTH_BAR_WIDTH: f32 = 200.0;
const ENERGY_BAR_WIDTH: f32 = 140.0;
const ITEM_BOX_SIZE: f32 = 80.0;
const MARGIN: f32 = 10.0;

const HEALTH_COLOR: Color = Color::new(0.85, 0.15, 0.15, 1.0);
const ENERGY_COLOR: Color = Color::new(0.25, 0.35, 0.95, 1.0);

/// Draw the full HUD for one frame.
pub fn draw_hud(player: &PlayerState, assets: &Assets) {
    draw_bar(
        Rect::new(MARGIN, MARGIN, HEALTH_BAR_WIDTH, BAR_HEIGHT),
        player.health,
        player.stat(Stat::Health),
        HEALTH_COLOR,
    );
    draw_bar(
        Rect::new(MARGIN, MARGIN * 2.0 + BAR_HEIGHT, ENERGY_BAR_WIDTH, BAR_HEIGHT),
        player.energy,
        player.stat(Stat::Energy),
        ENERGY_COLOR,
    );

    draw_exp(player.exp);

    // Weapon box flashes gold while the swing is active
    let weapon_box = Rect::new(
        MARGIN,
        VIEW_HEIGHT - ITEM_BOX_SIZE - MARGIN,
        ITEM_BOX_SIZE,
        ITEM_BOX_SIZE,
    );
    draw_box(weapon_box, player.attacking);
    draw_icon(assets.weapon_icon(player.weapon), weapon_box);

    let magic_box = Rect::new(
        MARGIN + ITEM_BOX_SIZE + MARGIN,
        VIEW_HEIGHT - ITEM_BOX_SIZE - MARGIN,
        ITEM_BOX_SIZE,
        ITEM_BOX_SIZE,
    );
    draw_box(magic_box, false);
    draw_icon(assets.magic_icon(player.magic), magic_box);
}

fn draw_bar(rect: Rect, current: f32, max: f32, color: Color) {
    draw_box(rect, false);
    let ratio = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    draw_rectangle(rect.x, rect.y, rect.w * ratio, rect.h, color);
}

fn draw_exp(exp: f32) {
    let text = format!("{}", exp.floor() as i64);
    let size = measure_text(&text, None, UI_FONT_SIZE as u16, 1.0);
    let x = VIEW_WIDTH - size.width - MARGIN * 2.0;
    let y = VIEW_HEIGHT - MARGIN * 2.0;
    draw_box(
        Rect::new(x - MARGIN, y - UI_FONT_SIZE, size.width + MARGIN * 2.0, UI_FONT_SIZE + MARGIN),
        false,
    );
    draw_text(&text, x, y, UI_FONT_SIZE, TEXT_COLOR);
}

fn draw_icon(texture: Option<&Texture2D>, slot: Rect) {
    let Some(texture) = texture else {
        return;
    };
    let inset = 12.0;
    draw_texture_ex(
        texture,
        slot.x + inset,
        slot.y + inset,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(slot.w - inset * 2.0, slot.h - inset * 2.0)),
            ..Default::default()
        },
    );
}
