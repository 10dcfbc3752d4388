//! Reachable workspace by brute-force sweep of the joint grid.

use log::debug;
use nalgebra::Point2;

use crate::angles::{cosd, sind};
use crate::{KinematicsError, LinkSet, NUM_JOINTS, Result};

/// Relative slack on `span / step` so that spans which are an exact
/// multiple of the step keep their last sample despite rounding.
const STEP_SLACK: f64 = 1e-9;

/// Largest grid `sample_workspace` accepts, about 1 GiB of points.
pub const MAX_WORKSPACE_SAMPLES: usize = 1 << 26;

/// Inclusive sweep bounds of one joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Number of grid samples `min, min + step, ...` not exceeding `max`.
    pub fn sample_count(&self, step: f64) -> usize {
        let span = self.max - self.min;
        // The cast saturates for huge spans; keep the increment from wrapping.
        ((span / step * (1.0 + STEP_SLACK)).floor() as usize).saturating_add(1)
    }

    fn samples(&self, step: f64) -> impl Iterator<Item = f64> {
        let min = self.min;
        (0..self.sample_count(step)).map(move |k| min + k as f64 * step)
    }

    fn validate(&self, joint: usize) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(KinematicsError::InvalidRange {
                reason: format!("joint {} bounds must be finite, got {:?}", joint + 1, self),
            });
        }
        if self.max < self.min {
            return Err(KinematicsError::InvalidRange {
                reason: format!(
                    "joint {} range is empty: max {} < min {}",
                    joint + 1,
                    self.max,
                    self.min
                ),
            });
        }
        Ok(())
    }
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::new(-180.0, 180.0)
    }
}

/// End-effector positions over a joint grid. Order follows the sweep and
/// carries no meaning; coincident points are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    points: Vec<Point2<f64>>,
}

impl Workspace {
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    pub fn into_points(self) -> Vec<Point2<f64>> {
        self.points
    }
}

/// Checks that `step` is positive, every range is finite and non-empty, and
/// the grid holds at most [`MAX_WORKSPACE_SAMPLES`] configurations. Returns
/// the grid size.
pub fn validate_grid(ranges: &[AngleRange; NUM_JOINTS], step: f64) -> Result<usize> {
    if !(step.is_finite() && step > 0.0) {
        return Err(KinematicsError::InvalidRange {
            reason: format!("step must be positive and finite, got {step}"),
        });
    }
    for (joint, range) in ranges.iter().enumerate() {
        range.validate(joint)?;
    }

    let total = ranges
        .iter()
        .try_fold(1usize, |acc, r| acc.checked_mul(r.sample_count(step)));
    match total {
        Some(total) if total <= MAX_WORKSPACE_SAMPLES => Ok(total),
        _ => Err(KinematicsError::InvalidRange {
            reason: format!(
                "step {step} gives more than {MAX_WORKSPACE_SAMPLES} workspace samples"
            ),
        }),
    }
}

/// Sweeps every joint over its range in increments of `step` degrees and
/// collects the end-effector position of each combination.
pub fn sample_workspace(
    links: &LinkSet,
    ranges: &[AngleRange; NUM_JOINTS],
    step: f64,
) -> Result<Workspace> {
    let total = validate_grid(ranges, step)?;
    debug!("sampling workspace: {total} configurations at {step} deg");

    let [l1, l2, l3] = links.lengths();
    let third: Vec<f64> = ranges[2].samples(step).collect();
    let mut points = Vec::with_capacity(total);

    for q1 in ranges[0].samples(step) {
        let (x1, y1) = (l1 * cosd(q1), l1 * sind(q1));
        for q2 in ranges[1].samples(step) {
            let phi2 = q1 + q2;
            let (x2, y2) = (x1 + l2 * cosd(phi2), y1 + l2 * sind(phi2));
            for &q3 in &third {
                let phi3 = phi2 + q3;
                points.push(Point2::new(x2 + l3 * cosd(phi3), y2 + l3 * sind(phi3)));
            }
        }
    }

    Ok(Workspace { points })
}
