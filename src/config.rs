/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD, or
/// `~/.config/flagrun`. Every key is optional; missing keys fall back to
/// defaults. Physics defaults depend on the selected edition.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub edition: Edition,
    pub physics: PhysicsConfig,
    pub view: ViewConfig,
    pub gamepad: GamepadConfig,
    pub log: LogConfig,
}

/// Which iteration of the game to run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// First iteration: respawn on fall, camera follows with lower clamp only.
    Classic,
    /// Second iteration: flagpole goal, game over, forward-only camera.
    #[default]
    Enhanced,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub friction: f32,      // multiplier applied to vx when no direction is held
    pub acceleration: f32,
    pub max_speed: f32,
    pub jump_impulse: f32,  // negative: y grows downward
    pub slide_speed: f32,   // flagpole slide, per step
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    /// Viewport size in world units.
    pub width: f32,
    pub height: f32,
    /// How far below the viewport the player must fall to be lost.
    pub fall_margin: f32,
    /// World units covered by one terminal cell.
    pub cell_width: f32,
    pub cell_height: f32,
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub restart: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Log file path. None: logging disabled (the terminal is in raw mode).
    pub file: Option<PathBuf>,
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl PhysicsConfig {
    pub fn for_edition(edition: Edition) -> Self {
        PhysicsConfig {
            gravity: 0.5,
            friction: 0.8,
            acceleration: 1.0,
            max_speed: 5.0,
            jump_impulse: match edition {
                Edition::Classic => -10.0,
                Edition::Enhanced => -12.0,
            },
            slide_speed: 4.0,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            width: default_view_width(),
            height: default_view_height(),
            fall_margin: default_fall_margin(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let edition = Edition::default();
        GameConfig {
            edition,
            physics: PhysicsConfig::for_edition(edition),
            view: ViewConfig::default(),
            gamepad: GamepadConfig {
                jump: default_pad_jump(),
                restart: default_pad_restart(),
            },
            log: LogConfig { file: None, level: default_log_level() },
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    physics: TomlPhysics,
    #[serde(default)]
    view: TomlView,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    edition: Edition,
}

/// Physics keys override the edition's defaults one by one.
#[derive(Deserialize, Debug, Default)]
struct TomlPhysics {
    gravity: Option<f32>,
    friction: Option<f32>,
    acceleration: Option<f32>,
    max_speed: Option<f32>,
    jump_impulse: Option<f32>,
    slide_speed: Option<f32>,
}

#[derive(Deserialize, Debug)]
struct TomlView {
    #[serde(default = "default_view_width")]
    width: f32,
    #[serde(default = "default_view_height")]
    height: f32,
    #[serde(default = "default_fall_margin")]
    fall_margin: f32,
    #[serde(default = "default_cell_width")]
    cell_width: f32,
    #[serde(default = "default_cell_height")]
    cell_height: f32,
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_pad_jump")]
    jump: Vec<String>,
    #[serde(default = "default_pad_restart")]
    restart: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default)]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_view_width() -> f32 { 800.0 }
fn default_view_height() -> f32 { 400.0 }
fn default_fall_margin() -> f32 { 100.0 }
fn default_cell_width() -> f32 { 10.0 }
fn default_cell_height() -> f32 { 25.0 }
fn default_tick_rate() -> u64 { 16 }     // ~60 Hz, one step per display refresh

fn default_pad_jump() -> Vec<String> { vec!["A".into()] }
fn default_pad_restart() -> Vec<String> { vec!["Start".into()] }
fn default_log_level() -> String { "info".into() }

impl Default for TomlView {
    fn default() -> Self {
        TomlView {
            width: default_view_width(),
            height: default_view_height(),
            fall_margin: default_fall_margin(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_pad_jump(),
            restart: default_pad_restart(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: String::new(), level: default_log_level() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from the first `config.toml` found.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.config/flagrun`. No file at all yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let search_dirs = candidate_dirs();
        match find_config(&search_dirs) {
            Some(path) => GameConfig::load_file(&path),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let toml_cfg = toml::from_str::<TomlConfig>(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_toml(toml_cfg)
    }

    #[cfg(test)]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg = toml::from_str::<TomlConfig>(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        GameConfig::from_toml(toml_cfg)
    }

    fn from_toml(t: TomlConfig) -> Result<Self, ConfigError> {
        let edition = t.general.edition;
        let base = PhysicsConfig::for_edition(edition);
        let physics = PhysicsConfig {
            gravity: t.physics.gravity.unwrap_or(base.gravity),
            friction: t.physics.friction.unwrap_or(base.friction),
            acceleration: t.physics.acceleration.unwrap_or(base.acceleration),
            max_speed: t.physics.max_speed.unwrap_or(base.max_speed),
            jump_impulse: t.physics.jump_impulse.unwrap_or(base.jump_impulse),
            slide_speed: t.physics.slide_speed.unwrap_or(base.slide_speed),
        };
        let view = ViewConfig {
            width: t.view.width,
            height: t.view.height,
            fall_margin: t.view.fall_margin,
            cell_width: t.view.cell_width,
            cell_height: t.view.cell_height,
            tick_rate_ms: t.view.tick_rate_ms,
        };
        let cfg = GameConfig {
            edition,
            physics,
            view,
            gamepad: GamepadConfig {
                jump: t.gamepad.jump,
                restart: t.gamepad.restart,
            },
            log: LogConfig {
                file: (!t.log.file.is_empty()).then(|| PathBuf::from(t.log.file)),
                level: t.log.level,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let v = &self.view;
        for (name, value) in [
            ("physics.gravity", p.gravity),
            ("physics.friction", p.friction),
            ("physics.acceleration", p.acceleration),
            ("physics.max_speed", p.max_speed),
            ("physics.jump_impulse", p.jump_impulse),
            ("physics.slide_speed", p.slide_speed),
            ("view.width", v.width),
            ("view.height", v.height),
            ("view.fall_margin", v.fall_margin),
            ("view.cell_width", v.cell_width),
            ("view.cell_height", v.cell_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be a finite number, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&p.friction) {
            return Err(ConfigError::Invalid(format!("physics.friction must be within [0, 1], got {}", p.friction)));
        }
        if p.gravity < 0.0 {
            return Err(ConfigError::Invalid(format!("physics.gravity must not be negative, got {}", p.gravity)));
        }
        for (name, value) in [
            ("physics.acceleration", p.acceleration),
            ("physics.max_speed", p.max_speed),
            ("physics.slide_speed", p.slide_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if p.jump_impulse >= 0.0 {
            return Err(ConfigError::Invalid(format!("physics.jump_impulse must be negative, got {}", p.jump_impulse)));
        }

        for (name, value) in [
            ("view.width", v.width),
            ("view.height", v.height),
            ("view.cell_width", v.cell_width),
            ("view.cell_height", v.cell_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if v.fall_margin < 0.0 {
            return Err(ConfigError::Invalid(format!("view.fall_margin must not be negative, got {}", v.fall_margin)));
        }
        if v.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("view.tick_rate_ms must be at least 1".into()));
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir + CWD + user config dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. ~/.config/flagrun
    if let Ok(home) = std::env::var("HOME") {
        let user = PathBuf::from(&home).join(".config/flagrun");
        if user.is_dir() && !dirs.iter().any(|d| d == &user) {
            dirs.push(user);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn find_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs.iter()
        .map(|d| d.join("config.toml"))
        .find(|p| p.exists())
}
