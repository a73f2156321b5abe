/// Static level geometry and decorative scenery.
/// Kinds are closed sets; behaviour is queried via methods so the
/// semantics of each kind live here.

use super::geom::Rect;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlatformKind {
    Ground,
    Brick,
    Block,
    QuestionBlock,
    Pipe,
    Flagpole, // goal: touching it starts the course-clear slide
}

impl PlatformKind {
    /// Does touching this platform end the level?
    pub fn is_goal(self) -> bool {
        matches!(self, PlatformKind::Flagpole)
    }
}

/// A solid rectangle. Immutable after construction.
#[derive(Clone, Debug)]
pub struct Platform {
    bounds: Rect,
    kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Platform { bounds: Rect::new(x, y, w, h), kind }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn kind(&self) -> PlatformKind {
        self.kind
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneryKind {
    Cloud,
    Bush,
}

/// Background decoration. Never collides.
///
/// `parallax` scales the camera offset: 1.0 scrolls with the level,
/// smaller values scroll slower and read as "further away".
#[derive(Clone, Debug)]
pub struct Scenery {
    pub kind: SceneryKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub parallax: f32,
}

impl Scenery {
    pub fn cloud(x: f32, y: f32, size: f32) -> Self {
        Scenery { kind: SceneryKind::Cloud, x, y, size, parallax: 0.5 }
    }

    pub fn bush(x: f32, y: f32, size: f32) -> Self {
        Scenery { kind: SceneryKind::Bush, x, y, size, parallax: 1.0 }
    }

    /// Horizontal screen position for a given camera offset.
    #[inline]
    pub fn screen_x(&self, camera_x: f32) -> f32 {
        self.x - camera_x * self.parallax
    }
}
