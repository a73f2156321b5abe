/// Horizontal camera: a single scroll offset in world units.
///
/// `Follow` keeps the player centred and only refuses to scroll left of
/// the level start. `ForwardOnly` also stops at the level end and never
/// scrolls back while play is active.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CameraMode {
    Follow,
    ForwardOnly,
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub offset: f32,
    pub mode: CameraMode,
}

impl Camera {
    pub fn new(mode: CameraMode) -> Self {
        Camera { offset: 0.0, mode }
    }

    /// Offset that would centre a player of `player_width` at `player_x`.
    #[inline]
    pub fn target(player_x: f32, player_width: f32, viewport_width: f32) -> f32 {
        player_x - viewport_width / 2.0 + player_width / 2.0
    }

    /// Recompute the offset for this frame and return it.
    /// `active` is true only while the game is in normal play.
    pub fn recompute(
        &mut self,
        player_x: f32,
        player_width: f32,
        viewport_width: f32,
        level_width: f32,
        active: bool,
    ) -> f32 {
        let target = Camera::target(player_x, player_width, viewport_width);
        match self.mode {
            CameraMode::Follow => {
                self.offset = target.max(0.0);
            }
            CameraMode::ForwardOnly => {
                if active && target > self.offset {
                    self.offset = target;
                }
                let max_offset = (level_width - viewport_width).max(0.0);
                self.offset = self.offset.clamp(0.0, max_offset);
            }
        }
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}
