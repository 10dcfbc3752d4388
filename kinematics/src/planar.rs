//! Position kinematics of the three-link chain.

use log::trace;
use nalgebra::Point2;

use crate::angles::{alpha, atan2d, cosd, sind};
use crate::{JointConfig, LinkSet, NUM_JOINTS, Pose, Result};

/// Positions of the base, the two intermediate joints and the end effector.
///
/// Each link turns by its joint angle relative to the previous link, then
/// advances by its length.
pub fn forward_kinematics(links: &LinkSet, joints: &JointConfig) -> [Point2<f64>; NUM_JOINTS + 1] {
    let mut points = [Point2::origin(); NUM_JOINTS + 1];
    let mut heading = 0.0;
    for (i, (length, angle)) in links.lengths().into_iter().zip(joints.angles()).enumerate() {
        heading += angle;
        points[i + 1] = Point2::new(
            points[i].x + length * cosd(heading),
            points[i].y + length * sind(heading),
        );
    }
    points
}

/// The two solution branches of the shoulder/elbow triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElbowBranch {
    /// Elbow counter-clockwise of the shoulder-to-wrist line.
    Up,
    /// Elbow clockwise of the shoulder-to-wrist line.
    Down,
}

impl ElbowBranch {
    pub const ALL: [ElbowBranch; 2] = [ElbowBranch::Up, ElbowBranch::Down];

    /// Sign applied to the triangle angle when solving this branch.
    fn sign(self) -> f64 {
        match self {
            ElbowBranch::Up => -1.0,
            ElbowBranch::Down => 1.0,
        }
    }
}

/// Both inverse kinematics branches. Neither is preferred; choosing one is up
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub elbow_up: JointConfig,
    pub elbow_down: JointConfig,
}

impl IkSolution {
    pub fn branch(&self, branch: ElbowBranch) -> &JointConfig {
        match branch {
            ElbowBranch::Up => &self.elbow_up,
            ElbowBranch::Down => &self.elbow_down,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElbowBranch, &JointConfig)> {
        ElbowBranch::ALL.into_iter().map(move |b| (b, self.branch(b)))
    }
}

/// Joint angles placing the end effector at `pose`.
///
/// The wrist offset `l3` is removed first, reducing the problem to a
/// two-link triangle with sides `l1`, `l2` and the shoulder-to-wrist
/// distance `r`. Fails with `UnreachablePose` when that triangle does not
/// close.
pub fn inverse_kinematics(links: &LinkSet, pose: &Pose) -> Result<IkSolution> {
    let l1 = links.l1();
    let a1 = pose.a - links.l3() * cosd(pose.theta);
    let b1 = pose.b - links.l3() * sind(pose.theta);
    let r = a1.hypot(b1);
    let alpha = alpha(l1, links.l2(), r)?;
    trace!("wrist at ({a1}, {b1}), r = {r}, alpha = {alpha}");

    let solve = |branch: ElbowBranch| {
        let signed = branch.sign() * alpha;
        let q1 = atan2d(b1, a1) - signed;
        let q2 = atan2d(r * sind(signed), r * cosd(signed) - l1);
        let q3 = pose.theta - q1 - q2;
        JointConfig::new(q1, q2, q3)
    };

    Ok(IkSolution {
        elbow_up: solve(ElbowBranch::Up),
        elbow_down: solve(ElbowBranch::Down),
    })
}
