/// The player body: the only moving entity.

use super::geom::Rect;

pub const PLAYER_SIZE: f32 = 30.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    width: f32,  // fixed for the entity's lifetime
    height: f32,
    pub grounded: bool,
    pub facing: Facing,
    spawn: (f32, f32),
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player::with_size(x, y, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn with_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Player {
            x, y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            grounded: false,
            facing: Facing::Right,
            spawn: (x, y),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[cfg(test)]
    pub fn spawn(&self) -> (f32, f32) {
        self.spawn
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Back to the start position with all motion cleared.
    pub fn respawn(&mut self) {
        self.x = self.spawn.0;
        self.y = self.spawn.1;
        self.vx = 0.0;
        self.vy = 0.0;
        self.grounded = false;
        self.facing = Facing::Right;
    }
}
