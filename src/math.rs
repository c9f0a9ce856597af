//! Shared numerical primitives anchored on `nalgebra`.
//!
//! Planar vectors are plain [`nalgebra::Vector2`] values, so addition,
//! subtraction, scaling, negation, [`norm`](nalgebra::Vector2::norm) and
//! [`dot`](nalgebra::Vector2::dot) come straight from nalgebra. The helpers
//! here add the polar and angular operations the charge models need.

use std::f64::consts::TAU;

use nalgebra::Vector2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;

/// Euclidean distance between `a` and `b`.
#[inline]
#[must_use]
pub fn distance(a: &R2, b: &R2) -> Scalar {
    (b - a).norm()
}

/// Angle in `[0, 2π)` of the vector pointing from `from` to `to`.
///
/// Returns `0` when both points coincide.
#[must_use]
pub fn direction(from: &R2, to: &R2) -> Scalar {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return 0.0;
    }
    wrap_angle(d.y.atan2(d.x))
}

/// Builds a vector from its polar form.
#[inline]
#[must_use]
pub fn from_polar(radius: Scalar, angle: Scalar) -> R2 {
    R2::new(radius * angle.cos(), radius * angle.sin())
}

/// Returns `(radius, angle)` with the angle in `[0, 2π)`.
#[must_use]
pub fn to_polar(v: &R2) -> (Scalar, Scalar) {
    (v.norm(), direction(&R2::zeros(), v))
}

/// Z component of the 3D cross product of two planar vectors.
#[inline]
#[must_use]
pub fn cross(a: &R2, b: &R2) -> Scalar {
    a.x * b.y - a.y * b.x
}

/// Linear interpolation `a + (b - a) t`.
#[inline]
#[must_use]
pub fn lerp(a: &R2, b: &R2, t: Scalar) -> R2 {
    a + (b - a) * t
}

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

fn wrap_angle(theta: Scalar) -> Scalar {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = R2::new(1.0, 1.0);
        let b = R2::new(4.0, 5.0);
        assert_relative_eq!(distance(&a, &b), 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(distance(&b, &a), 5.0, epsilon = 1.0e-12);
    }

    #[test]
    fn direction_covers_full_turn() {
        let o = R2::zeros();
        assert_relative_eq!(direction(&o, &R2::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(direction(&o, &R2::new(0.0, 1.0)), FRAC_PI_2, epsilon = 1.0e-12);
        assert_relative_eq!(direction(&o, &R2::new(-1.0, 0.0)), PI, epsilon = 1.0e-12);
        assert_relative_eq!(direction(&o, &R2::new(0.0, -1.0)), 3.0 * FRAC_PI_2, epsilon = 1.0e-12);
    }

    #[test]
    fn direction_of_coincident_points_is_zero() {
        let p = R2::new(2.5, -1.0);
        assert_eq!(direction(&p, &p), 0.0);
    }

    #[test]
    fn polar_round_trip_preserves_vector() {
        let v = R2::new(-3.0, 4.0);
        let (r, theta) = to_polar(&v);
        assert_relative_eq!(r, 5.0, epsilon = 1.0e-12);
        let back = from_polar(r, theta);
        assert_relative_eq!(back.x, v.x, epsilon = 1.0e-12);
        assert_relative_eq!(back.y, v.y, epsilon = 1.0e-12);
    }

    #[test]
    fn cross_of_unit_axes_is_one() {
        assert_eq!(cross(&R2::new(1.0, 0.0), &R2::new(0.0, 1.0)), 1.0);
        assert_eq!(cross(&R2::new(0.0, 1.0), &R2::new(1.0, 0.0)), -1.0);
    }

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }
}
