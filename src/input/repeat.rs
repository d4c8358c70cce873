// Key repeat tracking - turns a held-key snapshot into press/down/release sets

use super::InputError;
use log::trace;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Seconds a key must be held before it starts repeating
pub const DEFAULT_TRIGGER_DELAY: f32 = 0.4;

/// Seconds between synthetic repeats once repeating has started
pub const DEFAULT_REPEAT_COOLDOWN: f32 = 0.04;

/// Timing of synthetic key repeats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRepeatConfig {
    /// Hold duration after which the first repeat fires
    trigger_delay: f32,

    /// Amount taken off the hold duration after each repeat
    cooldown: f32,
}

impl KeyRepeatConfig {
    /// Create a repeat configuration, rejecting timings that would never settle
    pub fn new(trigger_delay: f32, cooldown: f32) -> Result<Self, InputError> {
        if !trigger_delay.is_finite() || trigger_delay < 0.0 {
            return Err(InputError::InvalidRepeatConfig(format!(
                "trigger delay must be a non-negative number of seconds, got {trigger_delay}"
            )));
        }
        if !cooldown.is_finite() || cooldown <= 0.0 {
            return Err(InputError::InvalidRepeatConfig(format!(
                "cooldown must be a positive number of seconds, got {cooldown}"
            )));
        }
        Ok(Self {
            trigger_delay,
            cooldown,
        })
    }

    pub fn trigger_delay(&self) -> f32 {
        self.trigger_delay
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }
}

impl Default for KeyRepeatConfig {
    fn default() -> Self {
        Self {
            trigger_delay: DEFAULT_TRIGGER_DELAY,
            cooldown: DEFAULT_REPEAT_COOLDOWN,
        }
    }
}

/// Key sets produced for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyTransitions {
    /// Keys that went down this frame, plus keys that repeated
    pub pressed: HashSet<KeyCode>,

    /// Keys held this frame
    pub down: HashSet<KeyCode>,

    /// Keys that were let go this frame
    pub released: HashSet<KeyCode>,
}

impl KeyTransitions {
    /// Empty all three sets
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.down.clear();
        self.released.clear();
    }
}

/// Tracks how long each key has been held and synthesizes repeats
///
/// A key stays tracked from the frame it appears in the held set until the
/// first frame it is missing from it. Presses shorter than one frame are
/// never seen since only the held state is sampled.
#[derive(Debug, Default)]
pub struct KeyRepeatTracker {
    config: KeyRepeatConfig,
    hold_times: HashMap<KeyCode, f32>,
}

impl KeyRepeatTracker {
    /// Create a tracker with the given repeat timing
    pub fn new(config: KeyRepeatConfig) -> Self {
        Self {
            config,
            hold_times: HashMap::new(),
        }
    }

    pub fn config(&self) -> KeyRepeatConfig {
        self.config
    }

    pub fn set_config(&mut self, config: KeyRepeatConfig) {
        self.config = config;
    }

    /// Advance by `elapsed` seconds given the keys held right now
    ///
    /// `frame` is cleared and refilled.
    pub fn advance(&mut self, held: &HashSet<KeyCode>, elapsed: f32, frame: &mut KeyTransitions) {
        frame.clear();

        for &key in held {
            if !self.hold_times.contains_key(&key) {
                trace!("Key pressed: {:?}", key);
                self.hold_times.insert(key, 0.0);
                frame.pressed.insert(key);
            }
        }

        let config = self.config;
        self.hold_times.retain(|key, held_for| {
            if !held.contains(key) {
                trace!("Key released: {:?}", key);
                frame.released.insert(*key);
                return false;
            }

            frame.down.insert(*key);
            *held_for += elapsed;
            if *held_for > config.trigger_delay {
                trace!("Key repeated: {:?} ({:.3}s)", key, held_for);
                frame.pressed.insert(*key);
                *held_for -= config.cooldown;
            }
            true
        });
    }

    /// Accumulated hold duration of a tracked key
    pub fn hold_time(&self, key: KeyCode) -> Option<f32> {
        self.hold_times.get(&key).copied()
    }

    pub fn is_tracked(&self, key: KeyCode) -> bool {
        self.hold_times.contains_key(&key)
    }

    /// Number of keys currently considered down
    pub fn tracked_len(&self) -> usize {
        self.hold_times.len()
    }

    /// Forget every held key without emitting releases
    pub fn clear(&mut self) {
        self.hold_times.clear();
    }
}
