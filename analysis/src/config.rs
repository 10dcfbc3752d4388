//! Typed arm description loaded from TOML.
//!
//! ```toml
//! mode = "inverse"
//! links = [10.0, 8.0, 4.0]
//! velocity_reference = [0.0, 45.0, -30.0]
//! external_load = [0.0, -10.0, 0.0]
//!
//! [pose]
//! theta = 30.0
//! a = 12.0
//! b = 5.0
//!
//! [workspace]
//! step = 6.0
//! ```

use std::path::Path;

use kinematics::{
    AngleRange, ExternalLoad, JointConfig, KinematicsError, LinkSet, NUM_JOINTS, Pose,
    validate_grid,
};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

const fn default_step() -> f64 {
    6.0
}

fn default_ranges() -> Vec<[f64; 2]> {
    vec![[-180.0, 180.0]; NUM_JOINTS]
}

/// How the position of the arm is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Joint angles are given directly.
    Forward,
    /// Joint angles are solved from `pose`.
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseConfig {
    /// End-effector orientation in degrees.
    pub theta: f64,
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Grid step in degrees (default: 6).
    #[serde(default = "default_step")]
    pub step: f64,

    /// `[min, max]` per joint in degrees (default: full turn for every joint).
    #[serde(default = "default_ranges")]
    pub ranges: Vec<[f64; 2]>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            ranges: default_ranges(),
        }
    }
}

/// Raw configuration as written in the file. Sequences stay `Vec` so a wrong
/// length is reported with the field name by [`ArmConfig::validate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmConfig {
    pub mode: Mode,

    /// Link lengths, base to tip.
    pub links: Vec<f64>,

    /// Configuration at which the Jacobian and torques are evaluated.
    pub velocity_reference: Vec<f64>,

    /// `[force_x, force_y, moment]` at the end effector.
    pub external_load: Vec<f64>,

    /// Joint angles for forward mode. Falls back to `velocity_reference`.
    #[serde(default)]
    pub joints: Option<Vec<f64>>,

    /// Target pose, required in inverse mode.
    #[serde(default)]
    pub pose: Option<PoseConfig>,

    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Where the arm position comes from once the configuration is validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionInput {
    Forward(JointConfig),
    Inverse(Pose),
}

/// A validated problem, ready for [`crate::analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArmProblem {
    pub links: LinkSet,
    pub position: PositionInput,
    pub velocity_reference: JointConfig,
    pub load: ExternalLoad,
    pub workspace_ranges: [AngleRange; NUM_JOINTS],
    pub workspace_step: f64,
}

fn finite(field: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(ConfigError::InvalidValue {
            field,
            message: format!("{v} is not a finite number"),
        }
        .into()),
        None => Ok(()),
    }
}

impl ArmConfig {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("reading arm configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every field and builds the typed problem. Nothing is defaulted
    /// silently except the documented forward-mode fallback.
    pub fn validate(&self) -> Result<ArmProblem> {
        let links = LinkSet::try_from(self.links.as_slice())?;

        finite("velocity_reference", &self.velocity_reference)?;
        let velocity_reference = JointConfig::try_from(self.velocity_reference.as_slice())?;

        finite("external_load", &self.external_load)?;
        let load = ExternalLoad::try_from(self.external_load.as_slice())?;

        let position = match self.mode {
            Mode::Forward => {
                if self.pose.is_some() {
                    warn!("`pose` is ignored in forward mode");
                }
                match &self.joints {
                    Some(joints) => {
                        finite("joints", joints)?;
                        PositionInput::Forward(JointConfig::try_from(joints.as_slice())?)
                    }
                    None => {
                        warn!("no `joints` given, using `velocity_reference` as the arm position");
                        PositionInput::Forward(velocity_reference)
                    }
                }
            }
            Mode::Inverse => {
                if self.joints.is_some() {
                    warn!("`joints` is ignored in inverse mode");
                }
                let pose = self.pose.ok_or(ConfigError::MissingField("pose"))?;
                finite("pose", &[pose.theta, pose.a, pose.b])?;
                PositionInput::Inverse(Pose::new(pose.theta, pose.a, pose.b))
            }
        };

        let ranges: [[f64; 2]; NUM_JOINTS] = self.workspace.ranges.as_slice().try_into().map_err(
            |_| KinematicsError::InvalidDimension {
                what: "workspace ranges",
                expected: NUM_JOINTS,
                actual: self.workspace.ranges.len(),
            },
        )?;
        let workspace_ranges = ranges.map(|[min, max]| AngleRange::new(min, max));
        validate_grid(&workspace_ranges, self.workspace.step)?;

        Ok(ArmProblem {
            links,
            position,
            velocity_reference,
            load,
            workspace_ranges,
            workspace_step: self.workspace.step,
        })
    }
}
