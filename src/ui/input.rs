/// Terminal keyboard input → held-key flags.
///
/// Drains crossterm events once per loop iteration and maps whitelisted
/// keys onto the shared `KeyState`. Release events are honoured when the
/// terminal's keyboard enhancement is active. Otherwise a key counts as
/// released once no Press/Repeat has arrived for `HOLD_TIMEOUT`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};

use crate::domain::input::{FrameInput, Key, KeyState};

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

pub struct TerminalInput {
    keys: KeyState,

    /// Timestamp of last Press/Repeat event for each held key.
    last_active: HashMap<Key, Instant>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,

    quit: bool,
}

/// Whitelist: terminal key code → game key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Char(c) => Key::from_name(c.encode_utf8(&mut [0; 4])),
        _ => None,
    }
}

/// Esc, q or Ctrl+C quit the game.
pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput {
            keys: KeyState::new(),
            last_active: HashMap::with_capacity(8),
            honor_release: false,
            quit: false,
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call this once per loop iteration, before the simulation tick.
    pub fn drain_events(&mut self) {
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.handle_key(key, Instant::now());
            }
        }
        self.expire(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Release && is_quit(&key) {
            self.quit = true;
            return;
        }
        let Some(k) = map_key(key.code) else { return };

        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.keys.release(k);
                self.last_active.remove(&k);
            }
            KeyEventKind::Release => {
                // Not trusted without enhancement; the timeout handles it.
            }
            _ => {
                self.keys.press(k);
                self.last_active.insert(k, now);
            }
        }
    }

    /// Release keys that have timed out (fallback for terminals without Release).
    pub fn expire(&mut self, now: Instant) {
        if self.honor_release { return; }
        let keys = &mut self.keys;
        self.last_active.retain(|k, t| {
            let alive = now.duration_since(*t) < HOLD_TIMEOUT;
            if !alive { keys.release(*k); }
            alive
        });
    }

    pub fn snapshot(&self) -> FrameInput {
        self.keys.snapshot()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
