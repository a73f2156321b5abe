/// Events emitted during a simulation step.
/// The frame loop consumes these for HUD messages and logging.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Jumped,
    Landed,
    FlagReached { x: f32 },
    CourseClear,
    Fell { x: f32 },
    GameOver,
    Respawned,
    Restarted,
}
