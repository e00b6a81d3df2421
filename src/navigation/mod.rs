//! Navigation targets for the keyboard attractor
//!
//! A target is an (angle, distance) pair turned into a planar offset in the
//! robot's frame. Stored angles carry a +90° offset with respect to the angle
//! the operator reads, so that straight ahead is stored as π/2.

use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;

/// Command direction selected by a command keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Straight ahead
    Forward,
    /// Left command angle
    Left,
    /// Right command angle
    Right,
}

impl Direction {
    /// Label printed in the command confirmation, padded so the angles line up
    fn label(&self) -> &'static str {
        match self {
            Direction::Forward => "FORWARD at:",
            Direction::Left => "LEFT at:   ",
            Direction::Right => "RIGHT at:  ",
        }
    }
}

/// Target computed from a command keystroke, handed to the transport at once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTarget {
    /// Which command produced this target
    pub direction: Direction,
    /// Stored angle the target was computed from (radians)
    pub angle: f64,
    /// Distance the target was computed from (meters)
    pub distance: f64,
    /// Offset in the robot frame (meters), z always 0
    pub offset: Vector3<f64>,
}

impl PendingTarget {
    /// Build a target from a stored angle and a distance.
    ///
    /// x = distance·sin(angle), y = −distance·cos(angle), z = 0
    pub fn from_polar(direction: Direction, angle: f64, distance: f64) -> Self {
        PendingTarget {
            direction,
            angle,
            distance,
            offset: Vector3::new(distance * angle.sin(), -distance * angle.cos(), 0.0),
        }
    }

    /// X component of the offset
    pub fn x(&self) -> f64 {
        self.offset.x
    }

    /// Y component of the offset
    pub fn y(&self) -> f64 {
        self.offset.y
    }

    /// Z component of the offset
    pub fn z(&self) -> f64 {
        self.offset.z
    }

    /// One-line confirmation of the resolved display angle and distance
    pub fn confirmation(&self) -> String {
        let display = angle_to_display(self.angle);
        match self.direction {
            Direction::Forward => format!(
                "Command {} {:+06.2} [deg] and {:5.2} [m]",
                self.direction.label(),
                display,
                self.distance
            ),
            _ => format!(
                "Command {} {:+6.2} [deg] and {:5.2} [m]",
                self.direction.label(),
                display,
                self.distance
            ),
        }
    }
}

/// Stored angle (radians) to the operator's display angle (degrees)
pub fn angle_to_display(stored: f64) -> f64 {
    (stored - FRAC_PI_2).to_degrees()
}

/// Display angle (degrees) back to the stored angle (radians)
pub fn display_to_angle(display_deg: f64) -> f64 {
    display_deg.to_radians() + FRAC_PI_2
}
