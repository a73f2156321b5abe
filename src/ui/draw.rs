/// Drawing for every renderable: player, platforms, scenery and the HUD.
///
/// World entities draw in world units; the renderer sets up the
/// world→cell transform beforehand. The HUD draws in cell units on an
/// untransformed surface. Pixel offsets here are cosmetic.

use std::f32::consts::PI;

use crossterm::style::Color;

use crate::domain::entity::{Facing, Player};
use crate::domain::platform::{Platform, PlatformKind, Scenery, SceneryKind};
use crate::sim::world::{Phase, WorldState};

use super::surface::Surface;

pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface, camera_x: f32);
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

const OUTLINE: Color = Color::Black;
const PLAYER_RED: Color = rgb(255, 0, 0);
const PLAYER_CAP: Color = rgb(170, 0, 0);
const SKIN: Color = rgb(255, 204, 204);
const GROUND: Color = rgb(200, 76, 12);
const BRICK: Color = rgb(180, 60, 20);
const BLOCK: Color = rgb(228, 92, 16);
const QUESTION: Color = rgb(252, 160, 68);
const PIPE: Color = rgb(0, 168, 0);
const PIPE_RIM: Color = rgb(80, 208, 80);
const POLE: Color = rgb(160, 200, 160);
const FLAG: Color = rgb(255, 255, 255);
const CLOUD: Color = rgb(252, 252, 252);
const BUSH: Color = rgb(0, 140, 0);
const HUD_TEXT: Color = Color::White;
const BANNER: Color = rgb(252, 216, 68);

// ── Player ──

impl Draw for Player {
    fn draw(&self, s: &mut dyn Surface, camera_x: f32) {
        let x = self.x - camera_x;
        s.fill_rect(x, self.y, self.width(), self.height(), PLAYER_RED);
        s.fill_rect(x, self.y, self.width(), self.height() / 5.0, PLAYER_CAP);

        let face_dx = match self.facing {
            Facing::Right => 15.0,
            Facing::Left => 5.0,
        };
        s.fill_rect(x + face_dx, self.y + 5.0, 10.0, 10.0, SKIN);
    }
}

// ── Platforms ──

impl Draw for Platform {
    fn draw(&self, s: &mut dyn Surface, camera_x: f32) {
        let b = self.bounds();
        let x = b.x - camera_x;
        match self.kind() {
            PlatformKind::Ground => boxed(s, x, b.y, b.w, b.h, GROUND),
            PlatformKind::Brick => boxed(s, x, b.y, b.w, b.h, BRICK),
            PlatformKind::Block => boxed(s, x, b.y, b.w, b.h, BLOCK),
            PlatformKind::QuestionBlock => {
                boxed(s, x, b.y, b.w, b.h, QUESTION);
                s.fill_text(x + b.w / 2.0, b.y + b.h / 2.0, "?", OUTLINE);
            }
            PlatformKind::Pipe => {
                boxed(s, x, b.y, b.w, b.h, PIPE);
                let rim_h = b.h.min(16.0);
                boxed(s, x - 4.0, b.y, b.w + 8.0, rim_h, PIPE_RIM);
            }
            PlatformKind::Flagpole => {
                s.fill_rect(x, b.y, b.w, b.h, POLE);
                let cx = x + b.w / 2.0;
                s.fill_arc(cx, b.y, 8.0, 0.0, 2.0 * PI, PIPE);
                s.fill_path(
                    &[(cx, b.y + 12.0), (cx - 40.0, b.y + 27.0), (cx, b.y + 42.0)],
                    FLAG,
                );
            }
        }
    }
}

fn boxed(s: &mut dyn Surface, x: f32, y: f32, w: f32, h: f32, color: Color) {
    s.fill_rect(x, y, w, h, color);
    s.stroke_rect(x, y, w, h, OUTLINE);
}

// ── Scenery ──

impl Draw for Scenery {
    fn draw(&self, s: &mut dyn Surface, camera_x: f32) {
        let x = self.screen_x(camera_x);
        let r = self.size;
        match self.kind {
            SceneryKind::Cloud => {
                s.fill_arc(x, self.y, r, 0.0, 2.0 * PI, CLOUD);
                s.fill_arc(x - r, self.y + r / 3.0, r * 0.7, 0.0, 2.0 * PI, CLOUD);
                s.fill_arc(x + r, self.y + r / 3.0, r * 0.7, 0.0, 2.0 * PI, CLOUD);
            }
            SceneryKind::Bush => {
                // Anchored on the ground line: upper half-discs only.
                s.fill_arc(x, self.y, r, PI, 2.0 * PI, BUSH);
                s.fill_arc(x - r, self.y, r * 0.7, PI, 2.0 * PI, BUSH);
                s.fill_arc(x + r, self.y, r * 0.7, PI, 2.0 * PI, BUSH);
            }
        }
    }
}

// ── HUD ──

/// Status line, transient message and end-of-game banners, in cell units.
pub struct Hud<'a> {
    pub world: &'a WorldState,
    pub cols: usize,
    pub rows: usize,
}

impl Hud<'_> {
    fn centered(&self, s: &mut dyn Surface, row: usize, text: &str, color: Color) {
        let len = text.chars().count();
        let col = self.cols.saturating_sub(len) / 2;
        s.fill_text(col as f32, row as f32, text, color);
    }
}

impl Draw for Hud<'_> {
    fn draw(&self, s: &mut dyn Surface, _camera_x: f32) {
        let w = self.world;
        let distance = (w.player.x.max(0.0) / 10.0) as u32;
        let status = format!(
            " FLAGRUN  {}  DIST {:>4}  FALLS {}",
            w.level_name, distance, w.falls,
        );
        s.fill_text(0.0, 0.0, &status, HUD_TEXT);

        let mid = self.rows / 2;
        match w.phase {
            Phase::GameOver => {
                self.centered(s, mid.saturating_sub(1), "GAME OVER", BANNER);
                self.centered(s, mid + 1, "[R] Restart   [Esc] Quit", HUD_TEXT);
            }
            Phase::Winning if w.course_clear => {
                self.centered(s, mid.saturating_sub(1), "COURSE CLEAR!", BANNER);
                self.centered(s, mid + 1, "[R] Play again   [Esc] Quit", HUD_TEXT);
            }
            _ => {
                if !w.message.is_empty() {
                    self.centered(s, 2, &w.message, HUD_TEXT);
                }
            }
        }

        let help = "←/→ A/D move   ↑/W/Space jump   [Esc] quit";
        s.fill_text(1.0, self.rows.saturating_sub(1) as f32, help, HUD_TEXT);
    }
}
