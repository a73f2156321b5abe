/// Player physics: one fixed simulation step against static geometry.
///
/// ## Step order
///
///   1. Horizontal intent (accelerate / friction)
///   2. Speed clamp
///   3. Horizontal move + resolve (x axis)
///   4. Gravity
///   5. Vertical move + resolve (y axis), grounded recomputed here
///   6. Jump (only from grounded)
///
/// Axes are resolved separately. Each overlapping platform is visited in
/// list order and pushes the player out again from wherever the previous
/// one left it, so with several simultaneous overlaps the LAST one wins.
/// Overlap is a discrete AABB test: a fast body can tunnel through thin
/// platforms.
///
/// Touching a goal platform short-circuits the step. The caller turns the
/// reported goal into a phase change; this module never touches game phase.

use crate::config::PhysicsConfig;

use super::entity::{Facing, Player};
use super::input::FrameInput;
use super::platform::Platform;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
}

/// What happened during one `update`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StepOutcome {
    /// Index of the goal platform touched this step, if any.
    pub goal: Option<usize>,
    pub jumped: bool,
    pub landed: bool,
}

/// Advance the player by exactly one step.
pub fn update(
    player: &mut Player,
    input: FrameInput,
    platforms: &[Platform],
    params: &PhysicsConfig,
) -> StepOutcome {
    let mut out = StepOutcome::default();
    let was_grounded = player.grounded;

    match input.horizontal() {
        Some(Facing::Left) => {
            player.vx -= params.acceleration;
            player.facing = Facing::Left;
        }
        Some(Facing::Right) => {
            player.vx += params.acceleration;
            player.facing = Facing::Right;
        }
        None => player.vx *= params.friction,
    }

    player.vx = player.vx.clamp(-params.max_speed, params.max_speed);

    player.x += player.vx;
    if let Some(goal) = resolve_axis(player, platforms, Axis::X) {
        out.goal = Some(goal);
        return out;
    }

    player.vy += params.gravity;
    player.y += player.vy;

    player.grounded = false;
    if let Some(goal) = resolve_axis(player, platforms, Axis::Y) {
        out.goal = Some(goal);
        return out;
    }
    out.landed = player.grounded && !was_grounded;

    if input.jump && player.grounded {
        player.vy = params.jump_impulse;
        player.grounded = false;
        out.jumped = true;
    }

    out
}

/// Push the player out of every overlapping platform along one axis.
///
/// Returns the index of a goal platform as soon as one is touched; the
/// player is then centred on it horizontally and nothing else is resolved.
pub fn resolve_axis(player: &mut Player, platforms: &[Platform], axis: Axis) -> Option<usize> {
    for (i, platform) in platforms.iter().enumerate() {
        let b = platform.bounds();
        if !player.rect().overlaps(&b) { continue; }

        if platform.kind().is_goal() {
            player.x = b.center_x() - player.width() / 2.0;
            return Some(i);
        }

        match axis {
            Axis::X => {
                if player.vx > 0.0 {
                    player.x = b.x - player.width();
                } else if player.vx < 0.0 {
                    player.x = b.right();
                }
                player.vx = 0.0;
            }
            Axis::Y => {
                if player.vy > 0.0 {
                    player.y = b.y - player.height();
                    player.grounded = true;
                } else if player.vy < 0.0 {
                    player.y = b.bottom(); // head bump
                }
                player.vy = 0.0;
            }
        }
    }
    None
}

/// Scripted flagpole slide. Returns true once the player's feet are at
/// `base_y`; from then on vertical velocity stays zero.
pub fn slide(player: &mut Player, base_y: f32, params: &PhysicsConfig) -> bool {
    player.vx = 0.0;
    if player.bottom() >= base_y {
        player.vy = 0.0;
        return true;
    }

    player.vy = params.slide_speed;
    player.y += player.vy;
    if player.bottom() >= base_y {
        player.y = base_y - player.height();
        player.vy = 0.0;
        return true;
    }
    false
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Edition;
    use crate::domain::platform::PlatformKind;
    use proptest::prelude::*;

    fn params() -> PhysicsConfig {
        PhysicsConfig::for_edition(Edition::Enhanced)
    }

    fn ground() -> Platform {
        Platform::new(0.0, 350.0, 1000.0, 50.0, PlatformKind::Ground)
    }

    fn held(left: bool, right: bool, jump: bool) -> FrameInput {
        FrameInput { left, right, jump, restart: false }
    }

    /// Player resting on `ground()` after settling.
    fn settled_player() -> Player {
        let mut p = Player::new(50.0, 320.0);
        let platforms = [ground()];
        update(&mut p, FrameInput::default(), &platforms, &params());
        p
    }

    // ── Horizontal resolution ──

    #[test]
    fn moving_right_stops_flush_against_left_edge() {
        let wall = Platform::new(100.0, 0.0, 40.0, 400.0, PlatformKind::Block);
        let mut p = Player::new(70.0, 100.0);
        p.vx = 4.0;
        p.x += p.vx; // right edge at 104, 4 into the wall
        resolve_axis(&mut p, &[wall.clone()], Axis::X);
        assert_eq!(p.x + p.width(), wall.bounds().x);
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn moving_left_stops_flush_against_right_edge() {
        let wall = Platform::new(100.0, 0.0, 40.0, 400.0, PlatformKind::Block);
        let mut p = Player::new(138.0, 100.0);
        p.vx = -3.0;
        resolve_axis(&mut p, &[wall.clone()], Axis::X);
        assert_eq!(p.x, wall.bounds().right());
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn walking_into_pipe_blocks_progress() {
        let platforms = [ground(), Platform::new(600.0, 280.0, 60.0, 70.0, PlatformKind::Pipe)];
        let mut p = Player::new(560.0, 320.0);
        for _ in 0..30 {
            update(&mut p, held(false, true, false), &platforms, &params());
        }
        assert_eq!(p.x + p.width(), 600.0);
        assert!(p.grounded);
    }

    // ── Vertical resolution ──

    #[test]
    fn falling_player_lands_on_top() {
        let platforms = [ground()];
        let mut p = Player::new(50.0, 300.0);
        let mut landed = false;
        for _ in 0..20 {
            landed |= update(&mut p, FrameInput::default(), &platforms, &params()).landed;
        }
        assert_eq!(p.y + p.height(), 350.0);
        assert_eq!(p.vy, 0.0);
        assert!(p.grounded);
        assert!(landed);
    }

    #[test]
    fn rising_player_bumps_head() {
        let ceiling = Platform::new(0.0, 100.0, 200.0, 40.0, PlatformKind::Brick);
        let mut p = Player::new(50.0, 145.0);
        p.vy = -10.0;
        p.y += p.vy;
        resolve_axis(&mut p, &[ceiling], Axis::Y);
        assert_eq!(p.y, 140.0);
        assert_eq!(p.vy, 0.0);
        assert!(!p.grounded);
    }

    #[test]
    fn grounded_is_recomputed_each_step() {
        let platforms = [ground()];
        let mut p = settled_player();
        assert!(p.grounded);
        // Walk off the right end of the ground.
        p.x = 995.0;
        for _ in 0..3 {
            update(&mut p, held(false, true, false), &platforms, &params());
        }
        assert!(!p.grounded);
    }

    // ── Jump ──

    #[test]
    fn jump_from_rest_applies_impulse() {
        let platforms = [ground()];
        let mut p = settled_player();
        assert!(p.grounded);
        assert_eq!(p.vy, 0.0);
        let out = update(&mut p, held(false, false, true), &platforms, &params());
        assert!(out.jumped);
        assert_eq!(p.vy, -12.0);
        assert!(!p.grounded);
    }

    #[test]
    fn jump_ignored_while_airborne() {
        let mut p = Player::new(50.0, 0.0);
        let out = update(&mut p, held(false, false, true), &[], &params());
        assert!(!out.jumped);
        assert_eq!(p.vy, params().gravity);
    }

    #[test]
    fn holding_jump_does_not_double_jump() {
        let platforms = [ground()];
        let mut p = settled_player();
        update(&mut p, held(false, false, true), &platforms, &params());
        let vy_after_jump = p.vy;
        update(&mut p, held(false, false, true), &platforms, &params());
        assert_eq!(p.vy, vy_after_jump + params().gravity);
    }

    // ── Goal ──

    #[test]
    fn touching_flagpole_short_circuits_step() {
        let pole = Platform::new(1800.0, 50.0, 10.0, 260.0, PlatformKind::Flagpole);
        let platforms = [ground(), pole];
        let mut p = Player::new(1768.0, 200.0);
        p.vx = 5.0;
        let out = update(&mut p, held(false, true, false), &platforms, &params());
        assert_eq!(out.goal, Some(1));
        // Centred on the pole, vertical phase skipped.
        assert_eq!(p.x + p.width() / 2.0, 1805.0);
        assert_eq!(p.y, 200.0);
        assert_eq!(p.vy, 0.0);
    }

    // ── Multi-overlap order ──

    #[test]
    fn last_overlapping_platform_wins() {
        // Two stacked blocks both overlap after the move; list order decides.
        let near = Platform::new(100.0, 0.0, 40.0, 40.0, PlatformKind::Block);
        let far = Platform::new(95.0, 40.0, 40.0, 40.0, PlatformKind::Block);
        let mut a = Player::new(72.0, 20.0);
        a.vx = 5.0;
        resolve_axis(&mut a, &[near.clone(), far.clone()], Axis::X);
        // `near` pushed to 70, vx zeroed, so `far` (still overlapping) can't push.
        assert_eq!(a.x, 70.0);

        let mut b = Player::new(72.0, 20.0);
        b.vx = 5.0;
        resolve_axis(&mut b, &[far, near], Axis::X);
        assert_eq!(b.x, 65.0);
    }

    // ── Horizontal intent ──

    #[test]
    fn left_priority_when_both_held() {
        let mut p = Player::new(50.0, 0.0);
        update(&mut p, held(true, true, false), &[], &params());
        assert_eq!(p.vx, -1.0);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn speed_is_clamped() {
        let mut p = Player::new(0.0, 0.0);
        for _ in 0..20 {
            update(&mut p, held(false, true, false), &[], &params());
        }
        assert_eq!(p.vx, params().max_speed);
    }

    // ── Slide ──

    #[test]
    fn slide_stops_at_pole_base() {
        let mut p = Player::new(1790.0, 100.0);
        let mut steps = 0;
        while !slide(&mut p, 310.0, &params()) {
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(p.bottom(), 310.0);
        assert_eq!(p.vy, 0.0);
        assert!(slide(&mut p, 310.0, &params()));
        assert_eq!(p.bottom(), 310.0);
    }

    // ── Properties ──

    proptest! {
        #[test]
        fn vx_stays_within_max_speed(keys in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..80)) {
            let params = params();
            let platforms = [ground()];
            let mut p = Player::new(300.0, 320.0);
            for (left, right) in keys {
                update(&mut p, held(left, right, false), &platforms, &params);
                prop_assert!(p.vx >= -params.max_speed && p.vx <= params.max_speed);
            }
        }

        #[test]
        fn friction_decays_geometrically(v0 in -5.0f32..5.0, n in 1usize..40) {
            let params = params();
            let mut p = Player::new(0.0, 0.0);
            p.vx = v0;
            for _ in 0..n {
                update(&mut p, FrameInput::default(), &[], &params);
            }
            let expected = v0 * params.friction.powi(n as i32);
            prop_assert!((p.vx - expected).abs() < 1e-4);
        }

        #[test]
        fn right_push_out_is_flush(px in 0.0f32..500.0, pw in 10.0f32..200.0, depth in 0.5f32..9.0) {
            let wall = Platform::new(px, 0.0, pw, 400.0, PlatformKind::Block);
            let mut p = Player::new(px - 30.0 + depth, 100.0);
            p.vx = depth;
            resolve_axis(&mut p, &[wall], Axis::X);
            prop_assert!((p.x + p.width() - px).abs() < 1e-3);
            prop_assert_eq!(p.vx, 0.0);
        }

        #[test]
        fn left_push_out_is_flush(px in 0.0f32..500.0, pw in 10.0f32..200.0, depth in 0.5f32..9.0) {
            let wall = Platform::new(px, 0.0, pw, 400.0, PlatformKind::Block);
            let mut p = Player::new(px + pw - depth, 100.0);
            p.vx = -depth;
            resolve_axis(&mut p, &[wall], Axis::X);
            prop_assert!((p.x - (px + pw)).abs() < 1e-3);
            prop_assert_eq!(p.vx, 0.0);
        }

        #[test]
        fn landing_is_flush(top in 50.0f32..400.0, depth in 0.5f32..9.0) {
            let floor = Platform::new(0.0, top, 500.0, 40.0, PlatformKind::Ground);
            let mut p = Player::new(100.0, top - 30.0 + depth);
            p.vy = depth;
            resolve_axis(&mut p, &[floor], Axis::Y);
            prop_assert!((p.y + p.height() - top).abs() < 1e-3);
            prop_assert_eq!(p.vy, 0.0);
            prop_assert!(p.grounded);
        }
    }
}
