/// Built-in level tables, one per edition.
///
/// Coordinates are world units with y growing downward. The ground top
/// sits at y = 350 in both levels; the viewport is 400 tall by default.
/// Platform order matters: collision resolves overlaps in list order.

use tracing::info;

use crate::config::Edition;
use crate::domain::entity::Player;
use crate::domain::platform::PlatformKind::{Block, Brick, Flagpole, Ground, Pipe, QuestionBlock};
use crate::domain::platform::{Platform, Scenery};
use crate::sim::world::{Phase, WorldState};

/// Runtime level data.
pub struct LevelDef {
    pub name: String,
    pub width: f32,
    pub spawn: (f32, f32),
    pub platforms: Vec<Platform>,
    pub scenery: Vec<Scenery>,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

pub fn level_for(edition: Edition) -> LevelDef {
    match edition {
        Edition::Classic => classic_level(),
        Edition::Enhanced => enhanced_level(),
    }
}

/// (Re)initialize the level: geometry, player, camera and phase.
pub fn load_level(world: &mut WorldState) {
    let def = level_for(world.edition);

    world.level_name = def.name.clone();
    world.level_width = def.width;
    world.platforms = def.platforms;
    world.scenery = def.scenery;
    world.player = Player::new(def.spawn.0, def.spawn.1);
    world.camera.reset();
    world.phase = Phase::Playing;
    world.goal_base_y = None;
    world.course_clear = false;
    world.tick = 0;
    world.set_message(&def.name, 90);

    info!(
        level = %world.level_name,
        platforms = world.platforms.len(),
        width = world.level_width,
        "level loaded"
    );
}

// ══════════════════════════════════════════════════════════════
// Level tables
// ══════════════════════════════════════════════════════════════

fn classic_level() -> LevelDef {
    let p = Platform::new;
    LevelDef {
        name: "World 1-1".to_string(),
        width: 3100.0,
        spawn: (50.0, 200.0),
        platforms: vec![
            // Ground, with a pit between 1000 and 1100
            p(0.0, 350.0, 1000.0, 50.0, Ground),
            p(1100.0, 350.0, 2000.0, 50.0, Ground),

            p(200.0, 250.0, 40.0, 40.0, Block),
            p(240.0, 250.0, 40.0, 40.0, Block),
            p(280.0, 250.0, 40.0, 40.0, Block),

            p(400.0, 150.0, 160.0, 40.0, Block),

            p(600.0, 280.0, 60.0, 70.0, Pipe),
            p(800.0, 230.0, 60.0, 120.0, Pipe),

            // Stairs up
            p(1200.0, 310.0, 40.0, 40.0, Block),
            p(1240.0, 270.0, 40.0, 80.0, Block),
            p(1280.0, 230.0, 40.0, 120.0, Block),
            p(1320.0, 190.0, 40.0, 160.0, Block),

            // Stairs down
            p(1440.0, 190.0, 40.0, 160.0, Block),
            p(1480.0, 230.0, 40.0, 120.0, Block),
            p(1520.0, 270.0, 40.0, 80.0, Block),
            p(1560.0, 310.0, 40.0, 40.0, Block),

            // Decorative pole: solid, not a goal in this edition
            p(1800.0, 50.0, 10.0, 300.0, Pipe),
            p(1775.0, 50.0, 60.0, 20.0, Block),
            p(1750.0, 310.0, 110.0, 40.0, Block),
        ],
        scenery: vec![],
    }
}

fn enhanced_level() -> LevelDef {
    let p = Platform::new;
    LevelDef {
        name: "World 1-2".to_string(),
        width: 3200.0,
        spawn: (50.0, 200.0),
        platforms: vec![
            // Ground with two pits: 1000..1100 and 2200..2300
            p(0.0, 350.0, 1000.0, 50.0, Ground),
            p(1100.0, 350.0, 1100.0, 50.0, Ground),
            p(2300.0, 350.0, 900.0, 50.0, Ground),

            p(200.0, 250.0, 40.0, 40.0, QuestionBlock),
            p(240.0, 250.0, 40.0, 40.0, Brick),
            p(280.0, 250.0, 40.0, 40.0, QuestionBlock),
            p(320.0, 250.0, 40.0, 40.0, Brick),
            p(260.0, 130.0, 40.0, 40.0, QuestionBlock),

            p(600.0, 280.0, 60.0, 70.0, Pipe),
            p(800.0, 230.0, 60.0, 120.0, Pipe),

            p(1250.0, 220.0, 40.0, 40.0, Brick),
            p(1290.0, 220.0, 40.0, 40.0, QuestionBlock),
            p(1330.0, 220.0, 40.0, 40.0, Brick),
            p(1370.0, 220.0, 40.0, 40.0, Brick),

            p(1500.0, 260.0, 60.0, 90.0, Pipe),

            // Stairs up to the pit edge; the top step is level with the far side
            p(2040.0, 310.0, 40.0, 40.0, Block),
            p(2080.0, 270.0, 40.0, 80.0, Block),
            p(2120.0, 230.0, 40.0, 120.0, Block),
            p(2160.0, 190.0, 40.0, 160.0, Block),

            // Stairs down after the pit
            p(2300.0, 190.0, 40.0, 160.0, Block),
            p(2340.0, 230.0, 40.0, 120.0, Block),
            p(2380.0, 270.0, 40.0, 80.0, Block),
            p(2420.0, 310.0, 40.0, 40.0, Block),

            // Flagpole stands on its base block; base top = pole bottom = 310
            p(2800.0, 50.0, 10.0, 260.0, Flagpole),
            p(2785.0, 310.0, 40.0, 40.0, Block),
        ],
        scenery: vec![
            Scenery::cloud(150.0, 60.0, 30.0),
            Scenery::cloud(450.0, 95.0, 24.0),
            Scenery::cloud(800.0, 50.0, 34.0),
            Scenery::cloud(1150.0, 80.0, 28.0),
            Scenery::cloud(1500.0, 60.0, 30.0),
            Scenery::cloud(1850.0, 95.0, 26.0),
            Scenery::bush(120.0, 350.0, 30.0),
            Scenery::bush(520.0, 350.0, 24.0),
            Scenery::bush(1300.0, 350.0, 30.0),
            Scenery::bush(1700.0, 350.0, 26.0),
            Scenery::bush(2550.0, 350.0, 30.0),
            Scenery::bush(2950.0, 350.0, 24.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn both() -> [LevelDef; 2] {
        [classic_level(), enhanced_level()]
    }

    #[test]
    fn platforms_have_positive_size() {
        for def in both() {
            for plat in &def.platforms {
                let b = plat.bounds();
                assert!(b.w > 0.0 && b.h > 0.0, "{}: {:?}", def.name, b);
            }
        }
    }

    #[test]
    fn spawn_is_clear_of_geometry() {
        for def in both() {
            let player = Player::new(def.spawn.0, def.spawn.1);
            assert!(
                def.platforms.iter().all(|p| !player.rect().overlaps(&p.bounds())),
                "{}", def.name
            );
        }
    }

    #[test]
    fn only_enhanced_has_a_goal() {
        let goals = |def: &LevelDef| def.platforms.iter().filter(|p| p.kind().is_goal()).count();
        assert_eq!(goals(&classic_level()), 0);
        assert_eq!(goals(&enhanced_level()), 1);
    }

    #[test]
    fn goal_sits_on_its_base() {
        let def = enhanced_level();
        let pole = def.platforms.iter().find(|p| p.kind().is_goal()).unwrap().bounds();
        let base = def.platforms.iter()
            .map(|p| p.bounds())
            .find(|b| b.y == pole.bottom() && b.x <= pole.x && b.right() >= pole.right());
        assert!(base.is_some());
    }

    #[test]
    fn geometry_within_level_width() {
        for def in both() {
            for plat in &def.platforms {
                assert!(plat.bounds().right() <= def.width, "{}", def.name);
            }
        }
    }

    #[test]
    fn load_level_resets_world() {
        let config = GameConfig::default();
        let mut world = WorldState::new(&config);
        load_level(&mut world);
        world.player.x = 999.0;
        world.camera.offset = 400.0;
        world.phase = Phase::GameOver;
        world.course_clear = true;
        load_level(&mut world);
        assert_eq!(world.player.x, 50.0);
        assert_eq!(world.camera.offset, 0.0);
        assert_eq!(world.phase, Phase::Playing);
        assert!(!world.course_clear);
        assert_eq!(world.level_width, 3200.0);
    }
}
