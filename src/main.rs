/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{GameConfig, LogConfig};
use sim::event::GameEvent;
use sim::level::load_level;
use sim::step;
use sim::world::WorldState;
use ui::gamepad::GamepadState;
use ui::input::TerminalInput;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(2);

fn main() -> anyhow::Result<()> {
    // Problems are reported before the terminal enters raw mode.
    let config = match GameConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config: {e}; using defaults");
            GameConfig::default()
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("logging disabled: {e:#}");
    }
    info!(edition = ?config.edition, "starting");

    let mut world = WorldState::new(&config);
    load_level(&mut world);

    let mut renderer = Renderer::new();
    let honor_release = renderer.init().context("terminal init failed")?;

    let result = game_loop(&mut world, &mut renderer, &config, honor_release);

    // Always restore the terminal, even when the loop failed.
    let cleanup = renderer.cleanup().context("terminal cleanup failed");
    result?;
    cleanup?;

    println!();
    println!("Thanks for playing Flagrun!");
    println!("Distance: {}  Falls: {}", (world.player.x.max(0.0) / 10.0) as u32, world.falls);
    Ok(())
}

/// File-backed tracing. Without a log file nothing is installed: stdout
/// belongs to the renderer.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = &log.file else { return Ok(()) };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .context("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
    honor_release: bool,
) -> anyhow::Result<()> {
    let mut kb = TerminalInput::new();
    kb.honor_release = honor_release;
    let mut gp = GamepadState::new(&config.gamepad);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.view.tick_rate_ms);

    loop {
        kb.drain_events();
        gp.update();

        if kb.quit_requested() {
            info!(tick = world.tick, "quit");
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let input = kb.snapshot().merge(gp.frame_input());

            let mut events = Vec::new();
            if input.restart && step::request_restart(world) {
                events.push(GameEvent::Restarted);
            }

            events.extend(step::step(world, input));
            renderer.render(world)?;
            events.extend(step::check_terminal(world));

            for event in &events {
                debug!(tick = world.tick, ?event, "event");
            }
            last_tick = Instant::now();
        }

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}
