//! Trigonometry in degrees.
//!
//! Every angle in this crate is expressed in degrees; conversion to radians
//! happens only inside these helpers.

use crate::{KinematicsError, Result};

/// Slack allowed on the law-of-cosines argument before a triangle is
/// considered open. Absorbs rounding at full stretch and full fold.
const COS_SLACK: f64 = 1e-12;

pub fn sind(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cosd(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tand(deg: f64) -> f64 {
    deg.to_radians().tan()
}

pub fn asind(x: f64) -> f64 {
    x.asin().to_degrees()
}

pub fn acosd(x: f64) -> f64 {
    x.acos().to_degrees()
}

pub fn atand(x: f64) -> f64 {
    x.atan().to_degrees()
}

pub fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Normalizes an angle into (-180, 180].
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Interior angle at the shoulder of the triangle with sides `l1`, `l2`
/// and `r`, where `l2` is the side opposite the angle:
///
/// `alpha = acosd((l1² + r² - l2²) / (2·l1·r))`
///
/// Fails with [`KinematicsError::UnreachablePose`] when the triangle does not
/// close, i.e. `r > l1 + l2`, `r < |l1 - l2|`, or `r` is zero.
pub fn alpha(l1: f64, l2: f64, r: f64) -> Result<f64> {
    let cos_alpha = (l1.powi(2) + r.powi(2) - l2.powi(2)) / (2.0 * l1 * r);

    // NaN (r == 0) fails the range check as well.
    if !(-1.0 - COS_SLACK..=1.0 + COS_SLACK).contains(&cos_alpha) {
        return Err(KinematicsError::UnreachablePose { l1, l2, r });
    }

    Ok(acosd(cos_alpha.clamp(-1.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_trig() {
        assert_relative_eq!(sind(30.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(cosd(60.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(tand(45.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(asind(0.5), 30.0, epsilon = 1e-9);
        assert_relative_eq!(acosd(0.5), 60.0, epsilon = 1e-9);
        assert_relative_eq!(atand(1.0), 45.0, epsilon = 1e-9);
        assert_relative_eq!(atan2d(1.0, -1.0), 135.0, epsilon = 1e-9);
        assert_relative_eq!(atan2d(-1.0, 0.0), -90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(190.0), -170.0, epsilon = 1e-9);
        assert_relative_eq!(wrap_degrees(-190.0), 170.0, epsilon = 1e-9);
        assert_relative_eq!(wrap_degrees(180.0), 180.0, epsilon = 1e-9);
        assert_relative_eq!(wrap_degrees(-180.0), 180.0, epsilon = 1e-9);
        assert_relative_eq!(wrap_degrees(720.5), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_alpha_right_triangle() {
        // 3-4-5 triangle: angle between sides 3 and 5 is acos(3/5).
        let a = alpha(3.0, 4.0, 5.0).unwrap();
        assert_relative_eq!(a, acosd(0.6), epsilon = 1e-9);
    }

    #[test]
    fn test_alpha_stretched_and_folded() {
        assert_relative_eq!(alpha(2.0, 1.5, 3.5).unwrap(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(alpha(2.0, 1.5, 0.5).unwrap(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(alpha(1.0, 2.0, 1.0).unwrap(), 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_alpha_fails_outside_triangle() {
        let (l1, l2) = (2.0, 1.5);
        for i in 1..80 {
            let r = i as f64 * 0.05;
            let outside = r > l1 + l2 || r < (l1 - l2).abs();
            // Keep clear of the exact boundaries, where rounding decides.
            if (r - (l1 + l2)).abs() < 1e-9 || (r - (l1 - l2).abs()).abs() < 1e-9 {
                continue;
            }
            assert_eq!(alpha(l1, l2, r).is_err(), outside, "r = {r}");
        }
    }

    #[test]
    fn test_alpha_error_carries_sides() {
        match alpha(1.0, 1.0, 5.0) {
            Err(KinematicsError::UnreachablePose { l1, l2, r }) => {
                assert_eq!((l1, l2, r), (1.0, 1.0, 5.0));
            }
            other => panic!("expected unreachable pose, got {other:?}"),
        }
    }

    #[test]
    fn test_alpha_zero_radius_is_unreachable() {
        assert!(alpha(1.0, 1.0, 0.0).is_err());
    }
}
