use edgefirst_schemas::builtin_interfaces::Time;
use edgefirst_schemas::std_msgs::Header;
use kinematics::JointState as KinematicsJointState;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use zenoh::Session;

pub const DEFAULT_JOINT_COMMAND_KEY: &str = "rt/robot/joint_commands";

/// ROS 2 `sensor_msgs/JointState`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JointState {
    pub header: Header,
    pub name: Vec<String>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub effort: Vec<f64>,
}

impl Default for JointState {
    fn default() -> Self {
        Self {
            header: Header {
                stamp: Time::new(0, 0),
                frame_id: String::new(),
            },
            name: Vec::new(),
            position: Vec::new(),
            velocity: Vec::new(),
            effort: Vec::new(),
        }
    }
}

/// Builds the ROS message for `joints`, stamped with `stamp` since the epoch.
pub fn to_ros_joint_state(joints: &[KinematicsJointState], stamp: std::time::Duration) -> JointState {
    let mut msg = JointState::default();
    msg.header.stamp = Time::new(stamp.as_secs() as i32, stamp.subsec_nanos());
    msg.header.frame_id = "arm_base".to_string();

    for (i, joint) in joints.iter().enumerate() {
        msg.name.push(format!("joint_{}", i + 1));
        msg.position.push(joint.angle);
        msg.velocity.push(joint.velocity);
        msg.effort.push(joint.effort);
    }
    msg
}

/// CDR little-endian payload, including the 4-byte encapsulation header ROS 2
/// expects.
pub fn encode(msg: &JointState) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    Ok(cdr::serialize::<_, _, cdr::CdrLe>(msg, cdr::Infinite)?)
}

pub struct CommunicationLayer {
    session: Session,
    joint_command_key: String,
}

impl CommunicationLayer {
    pub async fn new(joint_command_key: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = zenoh::config::Config::default();
        let session = zenoh::open(config).await.map_err(|e| e.to_string())?;

        Ok(Self {
            session,
            joint_command_key: joint_command_key.to_string(),
        })
    }

    pub async fn publish_joint_command(&self, joints: &[KinematicsJointState]) -> Result<(), Box<dyn std::error::Error>> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let payload = encode(&to_ros_joint_state(joints, now))?;
        debug!("publishing {} bytes on {}", payload.len(), self.joint_command_key);
        self.session.put(&self.joint_command_key, payload).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn joints() -> [KinematicsJointState; 3] {
        [
            KinematicsJointState::from_degrees(90.0, 12.5),
            KinematicsJointState::from_degrees(0.0, -3.0),
            KinematicsJointState::from_degrees(-45.0, 0.0),
        ]
    }

    #[test]
    fn test_ros_joint_state_fields() {
        let msg = to_ros_joint_state(&joints(), Duration::new(1_700_000_000, 42));

        assert_eq!(msg.name, vec!["joint_1", "joint_2", "joint_3"]);
        assert!((msg.position[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((msg.position[2] + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(msg.velocity, vec![0.0; 3]);
        assert_eq!(msg.effort, vec![12.5, -3.0, 0.0]);
        assert_eq!(msg.header.frame_id, "arm_base");
    }

    #[test]
    fn test_encoded_payload_has_single_encapsulation_header() {
        let msg = to_ros_joint_state(&joints(), Duration::ZERO);
        let payload = encode(&msg).unwrap();

        assert_eq!(&payload[..4], &[0x00, 0x01, 0x00, 0x00]);

        let decoded: JointState = cdr::deserialize(&payload).unwrap();
        assert_eq!(decoded.name, msg.name);
        assert_eq!(decoded.effort, msg.effort);
    }
}
