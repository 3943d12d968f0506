//! Upgrade menu
//!
//! Five columns, one per stat, shown while the level is paused. Left/right
//! moves the selection (wrapping); confirm spends exp on the selected stat.

use macroquad::prelude::*;

use crate::input::InputState;
use crate::player::{PlayerState, Stat};
use crate::settings::{VIEW_HEIGHT, VIEW_WIDTH};

use super::{draw_box, TEXT_COLOR, UI_FONT_SIZE};

const COLUMN_WIDTH: f32 = 180.0;
const COLUMN_HEIGHT: f32 = 440.0;
const COLUMN_GAP: f32 = 30.0;

/// Selection state of the pause menu.
#[derive(Debug, Default)]
pub struct UpgradeMenu {
    selection: usize,
}

impl UpgradeMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Stat {
        Stat::ALL[self.selection]
    }

    /// Move the selection and apply purchases. Returns true when a purchase
    /// went through.
    pub fn handle_input(&mut self, input: &InputState, player: &mut PlayerState) -> bool {
        let count = Stat::ALL.len();
        if input.menu_left {
            self.selection = (self.selection + count - 1) % count;
        }
        if input.menu_right {
            self.selection = (self.selection + 1) % count;
        }
        if input.menu_confirm {
            return player.purchase(self.selected());
        }
        false
    }

    /// Draw the menu over a dimmed level.
    pub fn draw(&self, player: &PlayerState) {
        draw_rectangle(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.5));

        let total = Stat::ALL.len() as f32 * COLUMN_WIDTH + (Stat::ALL.len() - 1) as f32 * COLUMN_GAP;
        let left = (VIEW_WIDTH - total) / 2.0;
        let top = (VIEW_HEIGHT - COLUMN_HEIGHT) / 2.0;

        for (index, stat) in Stat::ALL.into_iter().enumerate() {
            let x = left + index as f32 * (COLUMN_WIDTH + COLUMN_GAP);
            let column = Rect::new(x, top, COLUMN_WIDTH, COLUMN_HEIGHT);
            draw_box(column, index == self.selection);

            draw_text(
                stat.label(),
                x + 16.0,
                top + 36.0,
                UI_FONT_SIZE * 1.2,
                TEXT_COLOR,
            );
            draw_text(
                &format!("{:.0}", player.stat(stat)),
                x + 16.0,
                top + 72.0,
                UI_FONT_SIZE,
                TEXT_COLOR,
            );

            // Fill level relative to the maximum, drawn as a vertical gauge
            let ratio = (player.stat(stat) / player.max_stat(stat)).clamp(0.0, 1.0);
            let gauge = Rect::new(x + COLUMN_WIDTH / 2.0 - 6.0, top + 100.0, 12.0, COLUMN_HEIGHT - 180.0);
            draw_rectangle(gauge.x, gauge.y, gauge.w, gauge.h, Color::new(0.3, 0.3, 0.3, 1.0));
            draw_rectangle(
                gauge.x,
                gauge.y + gauge.h * (1.0 - ratio),
                gauge.w,
                gauge.h * ratio,
                TEXT_COLOR,
            );

            let cost = player.upgrade_cost[stat as usize];
            draw_text(
                &format!("cost {:.0}", cost),
                x + 16.0,
                top + COLUMN_HEIGHT - 24.0,
                UI_FONT_SIZE,
                TEXT_COLOR,
            );
        }
    }
}
