// src/console/keymap.rs
// Maps raw input bytes to console actions.

use super::params::Parameter;
use crate::AttractorError;
use crate::navigation::Direction;
use serde::{Deserialize, Serialize};

/// Action decoded from one input byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    /// Add a signed step to a parameter
    Tune(Parameter, f64),
    /// Emit a target in the given direction
    Command(Direction),
    /// Leave the command loop
    Quit,
}

/// Byte assigned to each console action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Increase the left angle
    pub inc_angle_left: char,
    /// Decrease the left angle
    pub dec_angle_left: char,
    /// Increase the right angle
    pub inc_angle_right: char,
    /// Decrease the right angle
    pub dec_angle_right: char,
    /// Increase the distance
    pub inc_distance: char,
    /// Decrease the distance
    pub dec_distance: char,
    /// Forward command
    pub forward: char,
    /// Left command
    pub left: char,
    /// Right command
    pub right: char,
    /// Quit
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            inc_angle_left: 'u',
            dec_angle_left: 'j',
            inc_angle_right: 'i',
            dec_angle_right: 'k',
            inc_distance: 'o',
            dec_distance: 'l',
            forward: 'w',
            left: 'a',
            right: 'd',
            quit: 'q',
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [char; 10] {
        [
            self.inc_angle_left,
            self.dec_angle_left,
            self.inc_angle_right,
            self.dec_angle_right,
            self.inc_distance,
            self.dec_distance,
            self.forward,
            self.left,
            self.right,
            self.quit,
        ]
    }

    /// Every binding must be a distinct single-byte character
    pub fn validate(&self) -> Result<(), AttractorError> {
        let keys = self.all();
        for (i, key) in keys.iter().enumerate() {
            if !key.is_ascii() {
                return Err(AttractorError::ConfigError(format!(
                    "key binding {:?} is not a single-byte character",
                    key
                )));
            }
            if keys[..i].contains(key) {
                return Err(AttractorError::ConfigError(format!(
                    "key {:?} is bound more than once",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Decode a byte; unbound bytes yield `None`
    pub fn decode(&self, byte: u8, step: f64) -> Option<Key> {
        let key = if bound(self.inc_angle_left, byte) {
            Key::Tune(Parameter::AngleLeft, step)
        } else if bound(self.dec_angle_left, byte) {
            Key::Tune(Parameter::AngleLeft, -step)
        } else if bound(self.inc_angle_right, byte) {
            Key::Tune(Parameter::AngleRight, step)
        } else if bound(self.dec_angle_right, byte) {
            Key::Tune(Parameter::AngleRight, -step)
        } else if bound(self.inc_distance, byte) {
            Key::Tune(Parameter::Distance, step)
        } else if bound(self.dec_distance, byte) {
            Key::Tune(Parameter::Distance, -step)
        } else if bound(self.forward, byte) {
            Key::Command(Direction::Forward)
        } else if bound(self.left, byte) {
            Key::Command(Direction::Left)
        } else if bound(self.right, byte) {
            Key::Command(Direction::Right)
        } else if bound(self.quit, byte) {
            Key::Quit
        } else {
            return None;
        };
        Some(key)
    }

    /// Banner listing the bindings, printed once at startup
    pub fn help(&self) -> String {
        format!(
            "Reading from keyboard and publishing a PointStamped\n\
             ---------------------------------------------------\n\
             Commands:\n\
             \t\t{forward}\t\t\n\
             \t{left}\t\t{right}\t\n\
             \n\n\
             {ial}/{dal} : increase/decrease angle for left command\n\
             {iar}/{dar} : increase/decrease angle for right command\n\
             {id}/{dd} : increase/decrease distance of any command\n\
             \n\n\
             CTRL-C or '{quit}' to quit\n\
             \n\
             Currently:",
            forward = self.forward,
            left = self.left,
            right = self.right,
            ial = self.inc_angle_left,
            dal = self.dec_angle_left,
            iar = self.inc_angle_right,
            dar = self.dec_angle_right,
            id = self.inc_distance,
            dd = self.dec_distance,
            quit = self.quit,
        )
    }
}

// Only ASCII bindings can match: bytes 0x80..=0xFF are not characters on their own.
fn bound(binding: char, byte: u8) -> bool {
    binding.is_ascii() && binding as u32 == u32::from(byte)
}
