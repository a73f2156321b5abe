/// Held-key state and the per-frame input snapshot.
///
/// Event callbacks only ever call `press` / `release`. The frame loop
/// reads a `FrameInput` snapshot once per tick, so physics never sees
/// input change mid-step.

use super::entity::Facing;

/// The fixed whitelist of keys the game reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    A,
    D,
    W,
    Space,
    Restart,
}

impl Key {
    const COUNT: usize = 8;

    /// Map a browser-style key identifier onto the whitelist.
    /// Unrecognized identifiers are ignored (None).
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "w" | "W" => Some(Key::W),
            " " | "Space" => Some(Key::Space),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Flat set of booleans, one per whitelisted key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyState {
    held: [bool; Key::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            left: self.is_held(Key::ArrowLeft) || self.is_held(Key::A),
            right: self.is_held(Key::ArrowRight) || self.is_held(Key::D),
            jump: self.is_held(Key::ArrowUp) || self.is_held(Key::W) || self.is_held(Key::Space),
            restart: self.is_held(Key::Restart),
        }
    }
}

/// Immutable per-frame input snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub restart: bool,
}

impl FrameInput {
    /// Horizontal intent. Left takes priority when both are held.
    pub fn horizontal(&self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else {
            None
        }
    }

    /// Combine two input sources (keyboard + gamepad).
    pub fn merge(self, other: FrameInput) -> FrameInput {
        FrameInput {
            left: self.left || other.left,
            right: self.right || other.right,
            jump: self.jump || other.jump,
            restart: self.restart || other.restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_mapping() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("d"), Some(Key::D));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("r"), Some(Key::Restart));
        assert_eq!(Key::from_name("Shift"), None);
        assert_eq!(Key::from_name("x"), None);
    }

    #[test]
    fn press_release_round() {
        let mut ks = KeyState::new();
        ks.press(Key::A);
        assert!(ks.snapshot().left);
        ks.release(Key::A);
        assert!(!ks.snapshot().left);
    }

    #[test]
    fn any_jump_key_jumps() {
        for key in [Key::ArrowUp, Key::W, Key::Space] {
            let mut ks = KeyState::new();
            ks.press(key);
            assert!(ks.snapshot().jump, "{key:?}");
        }
    }

    #[test]
    fn snapshot_is_detached_from_later_events() {
        let mut ks = KeyState::new();
        ks.press(Key::ArrowRight);
        let frame = ks.snapshot();
        ks.release(Key::ArrowRight);
        assert!(frame.right);
    }

    #[test]
    fn left_wins_when_both_held() {
        let input = FrameInput { left: true, right: true, ..Default::default() };
        assert_eq!(input.horizontal(), Some(Facing::Left));
    }

    #[test]
    fn merge_ors_sources() {
        let kb = FrameInput { left: true, ..Default::default() };
        let pad = FrameInput { jump: true, ..Default::default() };
        let merged = kb.merge(pad);
        assert!(merged.left && merged.jump);
        assert!(!merged.right && !merged.restart);
    }
}
