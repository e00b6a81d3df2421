//! Keyboard Attractor - operator console for directional navigation targets
//!
//! This library turns single keypresses read from a raw-mode terminal into
//! `PointStamped` targets (angle + distance) expressed in the robot's frame,
//! and publishes them over ROS 2.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod console;
pub mod navigation;
pub mod ros_interface;
pub mod terminal;

// Re-export commonly used items for easier access
pub use console::{CommandLoop, Key, KeyBindings, KeySource, Rate, TickOutcome, TunableParameters};
pub use navigation::{Direction, PendingTarget};
pub use ros_interface::{RosTransport, TargetSink};
pub use terminal::{RawModeGuard, ShutdownSignal, StdinKeys};

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

/// Environment variable naming an optional YAML configuration file
pub const CONFIG_ENV_VAR: &str = "KEYBOARD_ATTRACTOR_CONFIG";

/// Main configuration structure for the keyboard attractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractorConfig {
    /// Frame id stamped into every published target
    pub frame_id: String,
    /// Topic the targets are published on
    pub topic: String,
    /// ROS 2 node name
    pub node_name: String,
    /// Outbound keep-last queue depth
    pub queue_depth: usize,
    /// Tick rate of the command loop in Hz
    pub rate_hz: f64,
    /// Increment applied by every tuning keystroke (radians or meters)
    pub step: f64,
    /// Initial stored angle of the left command (radians)
    pub angle_left: f64,
    /// Initial stored angle of the right command (radians)
    pub angle_right: f64,
    /// Stored angle of the forward command (radians)
    pub angle_forward: f64,
    /// Initial command distance (meters)
    pub distance: f64,
    /// Process every queued byte in one tick instead of one byte per tick
    pub drain_burst: bool,
    /// Key bindings
    pub keys: KeyBindings,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        AttractorConfig {
            frame_id: "hokuyo_link".to_string(),
            topic: "/bci_command".to_string(),
            node_name: "keyboard_attractor".to_string(),
            queue_depth: 1000,
            rate_hz: 10.0,
            step: 0.01,
            angle_left: 3.0 * FRAC_PI_4,
            angle_right: FRAC_PI_4,
            angle_forward: FRAC_PI_2,
            distance: 1.0,
            drain_burst: false,
            keys: KeyBindings::default(),
        }
    }
}

impl AttractorConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, AttractorError> {
        let config: AttractorConfig =
            serde_yaml::from_str(text).map_err(|e| AttractorError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, AttractorError> {
        log::info!("Loading configuration from: {}", path);

        let text = std::fs::read_to_string(path)
            .map_err(|e| AttractorError::ConfigError(format!("{}: {}", path, e)))?;

        Self::from_yaml_str(&text)
    }

    /// Load from `KEYBOARD_ATTRACTOR_CONFIG` when set, otherwise use defaults
    pub fn load() -> Result<Self, AttractorError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the command loop cannot run with
    pub fn validate(&self) -> Result<(), AttractorError> {
        if !(self.rate_hz > 0.0 && self.rate_hz.is_finite()) {
            return Err(AttractorError::ConfigError(format!(
                "rate_hz must be positive, got {}",
                self.rate_hz
            )));
        }
        // The tick period has to fit in a Duration.
        if std::time::Duration::try_from_secs_f64(1.0 / self.rate_hz).is_err() {
            return Err(AttractorError::ConfigError(format!(
                "rate_hz {} gives a tick period that is too long",
                self.rate_hz
            )));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(AttractorError::ConfigError(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        for (name, angle) in [
            ("angle_left", self.angle_left),
            ("angle_right", self.angle_right),
            ("angle_forward", self.angle_forward),
        ] {
            if !angle.is_finite() {
                return Err(AttractorError::ConfigError(format!(
                    "{} must be finite, got {}",
                    name, angle
                )));
            }
        }
        if !(self.distance >= 0.0 && self.distance.is_finite()) {
            return Err(AttractorError::ConfigError(format!(
                "distance must not be negative, got {}",
                self.distance
            )));
        }
        if self.queue_depth == 0 {
            return Err(AttractorError::ConfigError("queue_depth must be at least 1".to_string()));
        }
        self.keys.validate()
    }
}

/// Keyboard attractor error types
#[derive(Debug)]
pub enum AttractorError {
    /// Terminal attribute or input error
    TerminalError(String),
    /// ROS interface error
    RosError(String),
    /// Configuration error
    ConfigError(String),
    /// Other I/O error
    IoError(std::io::Error),
}

impl std::fmt::Display for AttractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AttractorError::TerminalError(msg) => write!(f, "Terminal error: {}", msg),
            AttractorError::RosError(msg) => write!(f, "ROS error: {}", msg),
            AttractorError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AttractorError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for AttractorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttractorError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AttractorError {
    fn from(err: std::io::Error) -> Self {
        AttractorError::IoError(err)
    }
}

impl From<r2r::Error> for AttractorError {
    fn from(err: r2r::Error) -> Self {
        AttractorError::RosError(err.to_string())
    }
}
