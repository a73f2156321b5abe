/// WorldState: the complete snapshot of a running game.
///
/// Single source of truth for everything that changes during play. The
/// frame loop owns it and passes it explicitly to `step`, the camera and
/// the renderer; nothing else holds mutable game state.
///
/// ## Level geometry
///
///   - `platforms`: solid rectangles, fixed for the level's lifetime
///   - `scenery`: decoration only, never collides
///
/// Both are rebuilt wholesale by `level::load_level` on every reset.

use crate::config::{Edition, GameConfig, PhysicsConfig, ViewConfig};
use crate::domain::camera::{Camera, CameraMode};
use crate::domain::entity::Player;
use crate::domain::platform::{Platform, Scenery};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    /// Flag touched: scripted slide, input ignored.
    Winning,
    GameOver,
}

impl Phase {
    /// Terminal phases accept a restart request.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Winning | Phase::GameOver)
    }
}

pub struct WorldState {
    // ── Level ──
    pub edition: Edition,
    pub level_name: String,
    pub level_width: f32,
    pub platforms: Vec<Platform>,
    pub scenery: Vec<Scenery>,

    // ── Entities ──
    pub player: Player,
    pub camera: Camera,

    // ── Tuning ──
    pub physics: PhysicsConfig,
    pub view: ViewConfig,

    // ── Meta ──
    pub phase: Phase,
    pub tick: u64,
    /// Feet height the flagpole slide ends at; set when the goal is touched.
    pub goal_base_y: Option<f32>,
    /// Slide finished: show the course-clear banner.
    pub course_clear: bool,
    pub falls: u32,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    /// Empty world carrying the configured tuning.
    /// Call `level::load_level` before the first step.
    pub fn new(config: &GameConfig) -> Self {
        let mode = match config.edition {
            Edition::Classic => CameraMode::Follow,
            Edition::Enhanced => CameraMode::ForwardOnly,
        };
        WorldState {
            edition: config.edition,
            level_name: String::new(),
            level_width: 0.0,
            platforms: vec![],
            scenery: vec![],
            player: Player::new(0.0, 0.0),
            camera: Camera::new(mode),
            physics: config.physics.clone(),
            view: config.view.clone(),
            phase: Phase::Playing,
            tick: 0,
            goal_base_y: None,
            course_clear: false,
            falls: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Has the player dropped far enough below the viewport to be lost?
    pub fn player_out_of_bounds(&self) -> bool {
        self.player.y > self.view.height + self.view.fall_margin
    }
}
