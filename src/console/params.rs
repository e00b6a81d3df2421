// src/console/params.rs
// Command parameters tuned from the keyboard: left/right angles and distance.

use crate::AttractorConfig;
use crate::navigation::{Direction, PendingTarget, angle_to_display};

/// Parameter addressed by a tuning keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// Stored angle of the left command
    AngleLeft,
    /// Stored angle of the right command
    AngleRight,
    /// Command distance
    Distance,
}

/// Angles and distance used to build command targets.
///
/// Angles are never wrapped or clamped. Distance is clamped at 0.0 on
/// decrement only.
#[derive(Debug, Clone, PartialEq)]
pub struct TunableParameters {
    /// Stored left angle (radians)
    pub angle_left: f64,
    /// Stored right angle (radians)
    pub angle_right: f64,
    /// Stored forward angle (radians), not tunable
    pub angle_forward: f64,
    /// Command distance (meters)
    pub distance: f64,
}

impl Default for TunableParameters {
    fn default() -> Self {
        Self::from_config(&AttractorConfig::default())
    }
}

impl TunableParameters {
    /// Initial parameters taken from the configuration
    pub fn from_config(config: &AttractorConfig) -> Self {
        TunableParameters {
            angle_left: config.angle_left,
            angle_right: config.angle_right,
            angle_forward: config.angle_forward,
            distance: config.distance,
        }
    }

    /// Add `step` to a parameter
    pub fn adjust(&mut self, parameter: Parameter, step: f64) {
        match parameter {
            Parameter::AngleLeft => self.angle_left += step,
            Parameter::AngleRight => self.angle_right += step,
            Parameter::Distance => {
                self.distance += step;
                if step < 0.0 && self.distance < 0.0 {
                    self.distance = 0.0;
                }
            }
        }
    }

    /// Target for a command, built from the current values
    pub fn target(&self, direction: Direction) -> PendingTarget {
        let angle = match direction {
            Direction::Forward => self.angle_forward,
            Direction::Left => self.angle_left,
            Direction::Right => self.angle_right,
        };
        PendingTarget::from_polar(direction, angle, self.distance)
    }

    /// Status dump shown after every tuning keystroke
    pub fn status_line(&self) -> String {
        format!(
            "\tLeft at: {:4.2} [deg]\tRight at: {:4.2} [deg]\tDistance at: {:5.2} [m]",
            angle_to_display(self.angle_left),
            angle_to_display(self.angle_right),
            self.distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_initial_values() {
        let params = TunableParameters::default();

        assert_eq!(params.angle_left, 3.0 * FRAC_PI_4);
        assert_eq!(params.angle_right, FRAC_PI_4);
        assert_eq!(params.angle_forward, FRAC_PI_2);
        assert_eq!(params.distance, 1.0);
    }

    #[rstest]
    #[case(Parameter::AngleLeft, 0.01)]
    #[case(Parameter::AngleLeft, -0.01)]
    #[case(Parameter::AngleRight, 0.01)]
    #[case(Parameter::AngleRight, -0.01)]
    #[case(Parameter::Distance, 0.01)]
    #[case(Parameter::Distance, -0.01)]
    fn test_single_adjust(#[case] parameter: Parameter, #[case] step: f64) {
        let mut params = TunableParameters::default();
        let before = params.clone();

        params.adjust(parameter, step);

        let (after, initial) = match parameter {
            Parameter::AngleLeft => (params.angle_left, before.angle_left),
            Parameter::AngleRight => (params.angle_right, before.angle_right),
            Parameter::Distance => (params.distance, before.distance),
        };
        assert!((after - (initial + step)).abs() < 1e-12);
        assert_eq!(params.angle_forward, before.angle_forward);
    }

    #[test]
    fn test_distance_clamps_on_decrement() {
        let mut params = TunableParameters { distance: 0.005, ..TunableParameters::default() };

        params.adjust(Parameter::Distance, -0.01);
        assert_eq!(params.distance, 0.0);

        params.adjust(Parameter::Distance, -0.01);
        assert_eq!(params.distance, 0.0);

        params.adjust(Parameter::Distance, 0.01);
        assert!((params.distance - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_angles_are_not_wrapped() {
        let mut params = TunableParameters::default();
        for _ in 0..1000 {
            params.adjust(Parameter::AngleRight, 0.01);
        }
        assert!(params.angle_right > 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_status_line() {
        let params = TunableParameters::default();
        assert_eq!(
            params.status_line(),
            "\tLeft at: 45.00 [deg]\tRight at: -45.00 [deg]\tDistance at:  1.00 [m]"
        );
    }
}
