/// The step function: advances the world by one frame.
///
/// Processing order:
///   1. Player update (physics while Playing, flagpole slide while Winning)
///   2. Phase transition from the physics outcome (goal → Winning)
///   3. Camera recompute
///
/// The frame loop renders after `step` and only then calls
/// `check_terminal`, so the frame in which the player is lost is still drawn.
/// A reset goes through `request_restart`, which only acts from a terminal
/// phase.

use tracing::{debug, info};

use crate::config::Edition;
use crate::domain::input::FrameInput;
use crate::domain::physics;
use super::event::GameEvent;
use super::level;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: FrameInput) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 { world.message.clear(); }
    }

    match world.phase {
        Phase::Playing => resolve_player(world, input, &mut events),
        Phase::Winning => resolve_slide(world, &mut events),
        Phase::GameOver => {}
    }
    resolve_camera(world);

    events
}

// ══════════════════════════════════════════════════════════════
// Player
// ══════════════════════════════════════════════════════════════

fn resolve_player(world: &mut WorldState, input: FrameInput, events: &mut Vec<GameEvent>) {
    let outcome = physics::update(&mut world.player, input, &world.platforms, &world.physics);

    if outcome.jumped { events.push(GameEvent::Jumped); }
    if outcome.landed { events.push(GameEvent::Landed); }

    if let Some(idx) = outcome.goal {
        let pole = world.platforms[idx].bounds();
        world.phase = Phase::Winning;
        world.goal_base_y = Some(pole.bottom());
        events.push(GameEvent::FlagReached { x: pole.center_x() });
        info!(tick = world.tick, x = pole.center_x(), "flag reached");
    }
}

fn resolve_slide(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    // No recorded base: the slide is over where the player stands.
    let base_y = world.goal_base_y.unwrap_or_else(|| world.player.bottom());
    let done = physics::slide(&mut world.player, base_y, &world.physics);

    if done && !world.course_clear {
        world.course_clear = true;
        world.set_message("COURSE CLEAR!", 0);
        events.push(GameEvent::CourseClear);
        info!(tick = world.tick, "course clear");
    }
}

// ══════════════════════════════════════════════════════════════
// Camera
// ══════════════════════════════════════════════════════════════

fn resolve_camera(world: &mut WorldState) {
    let active = world.phase == Phase::Playing;
    world.camera.recompute(
        world.player.x,
        world.player.width(),
        world.view.width,
        world.level_width,
        active,
    );
}

// ══════════════════════════════════════════════════════════════
// Terminal conditions / reset
// ══════════════════════════════════════════════════════════════

/// Fell off the level? Enhanced: game over. Classic: straight back to
/// the start, play continues.
pub fn check_terminal(world: &mut WorldState) -> Vec<GameEvent> {
    if world.phase != Phase::Playing || !world.player_out_of_bounds() {
        return vec![];
    }

    let mut events = vec![GameEvent::Fell { x: world.player.x }];
    world.falls += 1;
    debug!(x = world.player.x, y = world.player.y, falls = world.falls, "player fell");

    match world.edition {
        Edition::Enhanced => {
            world.phase = Phase::GameOver;
            world.set_message("GAME OVER", 0);
            events.push(GameEvent::GameOver);
            info!(tick = world.tick, "game over");
        }
        Edition::Classic => {
            world.player.respawn();
            events.push(GameEvent::Respawned);
        }
    }
    events
}

/// Honour a restart request. Only terminal phases reset; returns whether
/// the level was reinitialized.
pub fn request_restart(world: &mut WorldState) -> bool {
    if !world.phase.is_terminal() {
        return false;
    }
    restart_level(world);
    true
}

pub fn restart_level(world: &mut WorldState) {
    info!(from = ?world.phase, "restarting level");
    level::load_level(world);
}
