//! ROS 2 interface for the keyboard attractor
//!
//! This module handles all communication with ROS 2:
//! - Advertising the target topic
//! - Stamping and publishing `PointStamped` targets
//! - Resolving the frame id from node parameters
//! - Spinning the node between ticks

mod publisher;

use r2r::{Clock, ClockType, Context, Node, ParameterValue, QosProfile};
use r2r::builtin_interfaces::msg::Time;
use r2r::geometry_msgs::msg::{Point, PointStamped};
use r2r::std_msgs::msg::Header;
use std::time::Duration;

pub use publisher::*;

use crate::navigation::PendingTarget;
use crate::{AttractorConfig, AttractorError};

/// Name of the node parameter overriding the configured frame id
pub const FRAME_ID_PARAMETER: &str = "frame_id";

/// Where command targets are handed off
pub trait TargetSink {
    /// Publish a target without waiting for acknowledgement
    fn publish(&mut self, target: &PendingTarget) -> Result<(), AttractorError>;

    /// Process pending middleware callbacks. Must not block.
    fn spin_once(&mut self) {}
}

/// ROS 2 transport publishing targets as `PointStamped`
pub struct RosTransport {
    node: Node,
    publisher: Publisher<PointStamped>,
    clock: Clock,
    frame_id: String,
    published: u64,
}

impl RosTransport {
    /// Create the node and advertise the target topic
    pub fn new(config: &AttractorConfig) -> Result<Self, AttractorError> {
        let context = Context::create()?;
        let mut node = Node::create(context, &config.node_name, "")?;

        let frame_id = {
            let params = node
                .params
                .lock()
                .map_err(|_| AttractorError::RosError("parameter table poisoned".to_string()))?;
            frame_id_from_parameter(
                params.get(FRAME_ID_PARAMETER).map(|p| &p.value),
                &config.frame_id,
            )
        };

        let qos = QosProfile::default().keep_last(config.queue_depth);
        let publisher = Publisher::new(&mut node, &config.topic, qos)?;
        let clock = Clock::create(ClockType::RosTime)?;

        log::info!(
            "Publishing PointStamped on {} in frame {}",
            publisher.topic(),
            frame_id
        );

        Ok(RosTransport {
            node,
            publisher,
            clock,
            frame_id,
            published: 0,
        })
    }

    /// Frame id stamped into every target
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Number of targets published so far
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl TargetSink for RosTransport {
    fn publish(&mut self, target: &PendingTarget) -> Result<(), AttractorError> {
        let now = self.clock.get_now()?;
        let message = target.to_ros_message(&self.frame_id, Clock::to_builtin_time(&now));

        self.publisher.publish(&message)?;
        self.published += 1;

        Ok(())
    }

    fn spin_once(&mut self) {
        self.node.spin_once(Duration::ZERO);
    }
}

impl PendingTarget {
    /// Convert to a ROS PointStamped message
    pub fn to_ros_message(&self, frame_id: &str, stamp: Time) -> PointStamped {
        PointStamped {
            header: Header {
                stamp,
                frame_id: frame_id.to_string(),
            },
            point: Point {
                x: self.x(),
                y: self.y(),
                z: self.z(),
            },
        }
    }
}

/// Frame id from the node parameter when it is a non-empty string
pub fn frame_id_from_parameter(value: Option<&ParameterValue>, fallback: &str) -> String {
    match value {
        Some(ParameterValue::String(frame_id)) if !frame_id.is_empty() => frame_id.clone(),
        Some(other) => {
            log::warn!(
                "Ignoring {} parameter {:?}, using {}",
                FRAME_ID_PARAMETER,
                other,
                fallback
            );
            fallback.to_string()
        }
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Direction;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_point_stamped_conversion() {
        let target = PendingTarget::from_polar(Direction::Forward, FRAC_PI_2, 2.0);
        let stamp = Time { sec: 12, nanosec: 500 };

        let message = target.to_ros_message("hokuyo_link", stamp.clone());

        assert_eq!(message.header.frame_id, "hokuyo_link");
        assert_eq!(message.header.stamp, stamp);
        assert!((message.point.x - 2.0).abs() < 1e-9);
        assert!(message.point.y.abs() < 1e-9);
        assert_eq!(message.point.z, 0.0);
    }

    #[test]
    fn test_frame_id_parameter_overrides_config() {
        let value = ParameterValue::String("base_laser".to_string());
        assert_eq!(frame_id_from_parameter(Some(&value), "hokuyo_link"), "base_laser");
    }

    #[test]
    fn test_frame_id_falls_back() {
        assert_eq!(frame_id_from_parameter(None, "hokuyo_link"), "hokuyo_link");

        let empty = ParameterValue::String(String::new());
        assert_eq!(frame_id_from_parameter(Some(&empty), "hokuyo_link"), "hokuyo_link");

        let wrong_type = ParameterValue::Integer(3);
        assert_eq!(frame_id_from_parameter(Some(&wrong_type), "hokuyo_link"), "hokuyo_link");
    }
}
