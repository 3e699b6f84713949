//! Keyboard and pointer tracking
//!
//! Platform event handlers call `press`/`release`/`pointer_*` as events
//! arrive. Once per tick the session takes a `snapshot` and then calls
//! `end_tick`. Every new press between two ticks counts once in
//! `just_pressed`, even if the key is released before the tick runs.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Logical game keys (platform key codes are mapped by the caller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Fire,
    /// Enter: continue or exit at a prompt
    Confirm,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    /// Keys that went down since the last `end_tick`
    pressed_since_last_tick: HashSet<Key>,
    pointer_down: bool,
    last_press: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-repeat presses of a held key are ignored
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed_since_last_tick.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Pointer pressed (or dragged while pressed) at `point`
    pub fn pointer_press(&mut self, point: Vec2) {
        self.pointer_down = true;
        self.last_press = Some(point);
    }

    pub fn pointer_release(&mut self) {
        self.pointer_down = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Pressed since the previous tick (whether or not still held)
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed_since_last_tick.contains(&key)
    }

    pub fn pointer_pressed(&self) -> bool {
        self.pointer_down
    }

    /// Most recent pointer press point, kept after release
    pub fn last_pointer_press(&self) -> Option<Vec2> {
        self.last_press
    }

    /// Commands for the next tick
    pub fn snapshot(&self) -> TickInput {
        let confirm = self.just_pressed(Key::Confirm);
        TickInput {
            rotate_left: self.is_held(Key::Left),
            rotate_right: self.is_held(Key::Right),
            thrust: self.is_held(Key::Thrust),
            fire: self.is_held(Key::Fire),
            continue_game: confirm,
            exit_game: confirm,
            pointer: if self.pointer_down {
                self.last_press
            } else {
                None
            },
        }
    }

    /// Start collecting presses for the next tick
    pub fn end_tick(&mut self) {
        self.pressed_since_last_tick.clear();
    }
}
