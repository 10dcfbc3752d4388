//! Full static analysis of a planar arm: position, Jacobian, torques and
//! reachable workspace, computed from a validated [`ArmProblem`].

use kinematics::{
    ElbowBranch, ForwardKinematics, IkSolution, Jacobian, JointConfig, JointState, LinkSet,
    NUM_JOINTS, PlanarArm, Torque, Workspace, forward_kinematics, inverse_kinematics, jacobian,
    sample_workspace, torque,
};
use log::debug;
use nalgebra::{Isometry2, Point2};

pub mod config;
mod error;

pub use config::{ArmConfig, ArmProblem, Mode, PositionInput};
pub use error::{AnalysisError, ConfigError, Result};

/// Joint angles of the arm, either as given or as solved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSolution {
    Forward(JointConfig),
    Inverse(IkSolution),
}

impl PositionSolution {
    /// Every configuration with its branch label, `None` for forward mode.
    pub fn configs(&self) -> Vec<(Option<ElbowBranch>, JointConfig)> {
        match self {
            PositionSolution::Forward(q) => vec![(None, *q)],
            PositionSolution::Inverse(solution) => {
                solution.iter().map(|(branch, q)| (Some(branch), *q)).collect()
            }
        }
    }

    /// The configuration for `branch`. Forward mode has a single
    /// configuration and ignores the branch.
    pub fn select(&self, branch: ElbowBranch) -> &JointConfig {
        match self {
            PositionSolution::Forward(q) => q,
            PositionSolution::Inverse(solution) => solution.branch(branch),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArmReport {
    pub links: LinkSet,
    pub position: PositionSolution,
    /// Evaluated at the velocity reference configuration.
    pub jacobian: Jacobian,
    pub torque: Torque,
    pub workspace: Workspace,
}

impl ArmReport {
    /// End-effector pose reached by `joints`.
    pub fn end_effector(&self, joints: &JointConfig) -> Isometry2<f64> {
        PlanarArm::new(self.links).forward_kinematics(joints)
    }

    /// Base, joint and tip positions of `joints`, for drawing the arm.
    pub fn chain(&self, joints: &JointConfig) -> [Point2<f64>; NUM_JOINTS + 1] {
        forward_kinematics(&self.links, joints)
    }

    /// Per-joint states carrying `joints` as position and the computed
    /// torques as effort.
    pub fn joint_states(&self, joints: &JointConfig) -> [JointState; NUM_JOINTS] {
        std::array::from_fn(|i| JointState::from_degrees(joints[i], self.torque[i]))
    }
}

/// Runs every stage on `problem`. Fails as a whole if any stage fails.
pub fn analyze(problem: &ArmProblem) -> Result<ArmReport> {
    let links = problem.links;

    let workspace = sample_workspace(&links, &problem.workspace_ranges, problem.workspace_step)?;
    debug!("workspace: {} points", workspace.len());

    let position = match problem.position {
        PositionInput::Forward(q) => PositionSolution::Forward(q),
        PositionInput::Inverse(pose) => {
            let solution = inverse_kinematics(&links, &pose)?;
            debug!("inverse kinematics: {solution:?}");
            PositionSolution::Inverse(solution)
        }
    };

    let jacobian = jacobian(&links, &problem.velocity_reference);
    let torque = torque(&jacobian, &problem.load);
    debug!("torque: {:?}", torque.as_slice());

    Ok(ArmReport {
        links,
        position,
        jacobian,
        torque,
        workspace,
    })
}
