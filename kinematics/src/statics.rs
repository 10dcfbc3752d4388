//! Velocity Jacobian and the static mapping from end-effector wrench to
//! joint torques.

use nalgebra::{Matrix3, Vector3};

use crate::angles::{cosd, sind};
use crate::{ExternalLoad, JointConfig, LinkSet, NUM_JOINTS};

/// Maps joint rates to `[ẋ, ẏ, θ̇]`.
pub type Jacobian = Matrix3<f64>;

pub type Torque = Vector3<f64>;

/// Jacobian of the end effector at `joints`.
///
/// Column `j` is the motion of the tip per unit rate of joint `j`: the sum
/// of the contributions of every link from `j` outwards. The last row is
/// all ones since every joint turns the tip by the same amount.
pub fn jacobian(links: &LinkSet, joints: &JointConfig) -> Jacobian {
    let lengths = links.lengths();
    let phi = joints.cumulative();

    let mut jac = Jacobian::zeros();
    let mut dx = 0.0;
    let mut dy = 0.0;
    for i in (0..NUM_JOINTS).rev() {
        dx += -lengths[i] * sind(phi[i]);
        dy += lengths[i] * cosd(phi[i]);
        jac[(0, i)] = dx;
        jac[(1, i)] = dy;
        jac[(2, i)] = 1.0;
    }
    jac
}

/// Joint torques holding `load` in static equilibrium: `τ = -Jᵀ·F`.
pub fn torque(jacobian: &Jacobian, load: &ExternalLoad) -> Torque {
    -(jacobian.transpose() * load.to_vector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_arm_jacobian() {
        let links = LinkSet::new(1.0, 2.0, 3.0).unwrap();
        let jac = jacobian(&links, &JointConfig::new(0.0, 0.0, 0.0));

        let expected = Matrix3::new(
            0.0, 0.0, 0.0, //
            6.0, 5.0, 3.0, //
            1.0, 1.0, 1.0,
        );
        assert_relative_eq!(jac, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_jacobian_suffix_sums() {
        let links = LinkSet::new(10.0, 8.0, 4.0).unwrap();
        let q = JointConfig::new(30.0, 45.0, -60.0);
        let jac = jacobian(&links, &q);

        let phi = [30.0, 75.0, 15.0];
        let dr1: Vec<f64> = (0..3).map(|i| -links.lengths()[i] * sind(phi[i])).collect();
        let dr2: Vec<f64> = (0..3).map(|i| links.lengths()[i] * cosd(phi[i])).collect();
        for j in 0..3 {
            assert_relative_eq!(jac[(0, j)], dr1[j..].iter().sum::<f64>(), epsilon = 1e-12);
            assert_relative_eq!(jac[(1, j)], dr2[j..].iter().sum::<f64>(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_jacobian_matches_finite_difference() {
        let links = LinkSet::new(10.0, 8.0, 4.0).unwrap();
        let q = JointConfig::new(-20.0, 70.0, 15.0);
        let jac = jacobian(&links, &q);

        // Entries are per radian of joint motion.
        let h = 1e-6;
        for j in 0..3 {
            let mut plus = q.angles();
            let mut minus = q.angles();
            plus[j] += h;
            minus[j] -= h;
            let tip_plus = crate::forward_kinematics(&links, &plus.into())[3];
            let tip_minus = crate::forward_kinematics(&links, &minus.into())[3];
            let scale = (2.0 * h).to_radians();
            assert_relative_eq!(jac[(0, j)], (tip_plus.x - tip_minus.x) / scale, epsilon = 1e-4);
            assert_relative_eq!(jac[(1, j)], (tip_plus.y - tip_minus.y) / scale, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_orientation_row_is_constant() {
        let links = LinkSet::new(3.0, 0.5, 7.0).unwrap();
        for q in [
            JointConfig::new(0.0, 0.0, 0.0),
            JointConfig::new(123.0, -45.0, 270.0),
            JointConfig::new(-90.0, 180.0, 1.0),
        ] {
            let jac = jacobian(&links, &q);
            assert_eq!(jac.row(2).iter().copied().collect::<Vec<_>>(), vec![1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn test_zero_load_gives_zero_torque() {
        let links = LinkSet::new(10.0, 8.0, 4.0).unwrap();
        let jac = jacobian(&links, &JointConfig::new(12.0, -34.0, 56.0));
        assert_eq!(torque(&jac, &ExternalLoad::default()), Torque::zeros());
    }

    #[test]
    fn test_torque_under_gravity_load() {
        // Horizontal arm holding a downward force at the tip: each joint
        // carries force times its lever arm.
        let links = LinkSet::new(1.0, 1.0, 1.0).unwrap();
        let jac = jacobian(&links, &JointConfig::new(0.0, 0.0, 0.0));
        let tau = torque(&jac, &ExternalLoad::new(0.0, -10.0, 0.0));
        assert_relative_eq!(tau, Vector3::new(30.0, 20.0, 10.0), epsilon = 1e-12);

        let tau = torque(&jac, &ExternalLoad::new(0.0, 0.0, 2.0));
        assert_relative_eq!(tau, Vector3::new(-2.0, -2.0, -2.0), epsilon = 1e-12);
    }
}
