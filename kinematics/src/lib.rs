//! Planar kinematics and statics for a serial arm with three revolute joints.
//!
//! All angles are in degrees. Joint angles are relative: each joint turns
//! from the direction of the previous link.

use nalgebra::{Isometry2, Vector2, Vector3};
use std::ops::Index;

pub mod angles;
mod error;
pub mod planar;
pub mod statics;
pub mod workspace;

pub use error::{KinematicsError, Result};
pub use planar::{ElbowBranch, IkSolution, forward_kinematics, inverse_kinematics};
pub use statics::{Jacobian, Torque, jacobian, torque};
pub use workspace::{
    AngleRange, MAX_WORKSPACE_SAMPLES, Workspace, sample_workspace, validate_grid,
};

pub const NUM_JOINTS: usize = 3;

/// Snapshot of a single joint at the hardware boundary, in SI units
/// (radians, rad/s, N·m).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointState {
    pub angle: f64,
    pub velocity: f64,
    pub effort: f64,
}

impl JointState {
    pub fn from_degrees(angle_deg: f64, effort: f64) -> Self {
        Self {
            angle: angle_deg.to_radians(),
            effort,
            ..Default::default()
        }
    }
}

fn exact_three(what: &'static str, values: &[f64]) -> Result<[f64; NUM_JOINTS]> {
    <[f64; NUM_JOINTS]>::try_from(values).map_err(|_| KinematicsError::InvalidDimension {
        what,
        expected: NUM_JOINTS,
        actual: values.len(),
    })
}

/// Lengths of the three links, base to tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSet {
    lengths: [f64; NUM_JOINTS],
}

impl LinkSet {
    pub fn new(l1: f64, l2: f64, l3: f64) -> Result<Self> {
        let lengths = [l1, l2, l3];
        for (index, &value) in lengths.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(KinematicsError::InvalidLinkLength { index, value });
            }
        }
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> [f64; NUM_JOINTS] {
        self.lengths
    }

    pub fn l1(&self) -> f64 {
        self.lengths[0]
    }

    pub fn l2(&self) -> f64 {
        self.lengths[1]
    }

    pub fn l3(&self) -> f64 {
        self.lengths[2]
    }

    /// Distance from the base to the tip with the arm fully stretched.
    pub fn reach(&self) -> f64 {
        self.lengths.iter().sum()
    }
}

impl TryFrom<&[f64]> for LinkSet {
    type Error = KinematicsError;

    fn try_from(values: &[f64]) -> Result<Self> {
        let [l1, l2, l3] = exact_three("links", values)?;
        Self::new(l1, l2, l3)
    }
}

/// Relative joint angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointConfig {
    angles: [f64; NUM_JOINTS],
}

impl JointConfig {
    pub fn new(q1: f64, q2: f64, q3: f64) -> Self {
        Self { angles: [q1, q2, q3] }
    }

    pub fn angles(&self) -> [f64; NUM_JOINTS] {
        self.angles
    }

    /// Absolute link directions: `φ_i = q_1 + ... + q_i`.
    pub fn cumulative(&self) -> [f64; NUM_JOINTS] {
        let mut phi = self.angles;
        for i in 1..NUM_JOINTS {
            phi[i] += phi[i - 1];
        }
        phi
    }

    /// Orientation of the end effector in the base frame.
    pub fn orientation(&self) -> f64 {
        self.angles.iter().sum()
    }
}

impl From<[f64; NUM_JOINTS]> for JointConfig {
    fn from(angles: [f64; NUM_JOINTS]) -> Self {
        Self { angles }
    }
}

impl TryFrom<&[f64]> for JointConfig {
    type Error = KinematicsError;

    fn try_from(values: &[f64]) -> Result<Self> {
        exact_three("joint angles", values).map(Self::from)
    }
}

impl Index<usize> for JointConfig {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.angles[index]
    }
}

/// Target for inverse kinematics: orientation `theta` (degrees) and position
/// (`a`, `b`) of the end effector in the base frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub theta: f64,
    pub a: f64,
    pub b: f64,
}

impl Pose {
    pub fn new(theta: f64, a: f64, b: f64) -> Self {
        Self { theta, a, b }
    }
}

/// Wrench applied at the end effector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExternalLoad {
    pub force_x: f64,
    pub force_y: f64,
    pub moment: f64,
}

impl ExternalLoad {
    pub fn new(force_x: f64, force_y: f64, moment: f64) -> Self {
        Self { force_x, force_y, moment }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.force_x, self.force_y, self.moment)
    }
}

impl TryFrom<&[f64]> for ExternalLoad {
    type Error = KinematicsError;

    fn try_from(values: &[f64]) -> Result<Self> {
        let [force_x, force_y, moment] = exact_three("external load", values)?;
        Ok(Self::new(force_x, force_y, moment))
    }
}

pub trait ForwardKinematics {
    fn forward_kinematics(&self, joints: &JointConfig) -> Isometry2<f64>;
}

/// A three-link planar arm with its base at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarArm {
    links: LinkSet,
}

impl PlanarArm {
    pub fn new(links: LinkSet) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn inverse_kinematics(&self, pose: &Pose) -> Result<IkSolution> {
        inverse_kinematics(&self.links, pose)
    }

    pub fn jacobian(&self, joints: &JointConfig) -> Jacobian {
        jacobian(&self.links, joints)
    }

    /// Checks that `solution` places the end effector on `target`, both in
    /// position and in orientation.
    pub fn verify_solution(&self, target: &Pose, solution: &JointConfig) -> bool {
        let fk_pose = self.forward_kinematics(solution);
        let translation_diff =
            (fk_pose.translation.vector - Vector2::new(target.a, target.b)).norm();
        let rotation_diff =
            angles::wrap_degrees(fk_pose.rotation.angle().to_degrees() - target.theta);

        translation_diff < 1e-6 && rotation_diff.abs() < 1e-6
    }
}

impl ForwardKinematics for PlanarArm {
    fn forward_kinematics(&self, joints: &JointConfig) -> Isometry2<f64> {
        let tip = forward_kinematics(&self.links, joints)[NUM_JOINTS];
        Isometry2::new(tip.coords, joints.orientation().to_radians())
    }
}
