use crate::constants::{COULOMB_CONSTANT, ELECTRON_CHARGE, PROTON_CHARGE};
use crate::math::{R2, Scalar};

use super::charge::Charge;

/// Point charge in coulombs.
///
/// Queried exactly at its own position, a point charge reports a zero field
/// and a zero potential instead of an infinity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Charge in coulombs (signed).
    pub charge: Scalar,
    /// Position in meters.
    pub position: R2,
}

impl PointCharge {
    /// Creates a point charge of `charge` coulombs at `position`.
    #[must_use]
    pub const fn new(charge: Scalar, position: R2) -> Self {
        Self { charge, position }
    }

    /// A single proton at `position`.
    #[must_use]
    pub const fn proton(position: R2) -> Self {
        Self::new(PROTON_CHARGE, position)
    }

    /// A single electron at `position`.
    #[must_use]
    pub const fn electron(position: R2) -> Self {
        Self::new(ELECTRON_CHARGE, position)
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: R2) -> Self {
        Self::new(self.charge, self.position + offset)
    }
}

impl Charge for PointCharge {
    fn field(&self, point: R2) -> R2 {
        let r_vec = point - self.position;
        let r = r_vec.norm();
        if r == 0.0 {
            return R2::zeros();
        }
        // r³ leaves the f64 range long before the field does
        (r_vec / r) * (COULOMB_CONSTANT * self.charge / r / r)
    }

    fn potential(&self, point: R2) -> Scalar {
        let r = (point - self.position).norm();
        if r == 0.0 {
            return 0.0;
        }
        COULOMB_CONSTANT * self.charge / r
    }

    fn net_charge(&self) -> Scalar {
        self.charge
    }

    fn source_points(&self) -> Vec<R2> {
        vec![self.position]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::{coulomb_from_permittivity, VACUUM_PERMITTIVITY};

    #[test]
    fn potential_of_single_point_charge_matches_reference_axis() {
        let q = PointCharge::new(1.0e-9, R2::zeros());
        let p = R2::new(0.0, 1.0);
        let ref_val = coulomb_from_permittivity(VACUUM_PERMITTIVITY) * 1.0e-9;
        assert_relative_eq!(q.potential(p), ref_val, max_relative = 1.0e-9);
    }

    #[test]
    fn field_points_away_from_positive_charge() {
        let q = PointCharge::new(1.0, R2::new(1.0, 1.0));
        let e = q.field(R2::new(3.0, 1.0));
        assert!(e.x > 0.0);
        assert_relative_eq!(e.y, 0.0);
        assert_relative_eq!(e.x, COULOMB_CONSTANT / 4.0, max_relative = 1.0e-12);
    }

    #[test]
    fn field_points_toward_negative_charge() {
        let q = PointCharge::electron(R2::zeros());
        let e = q.field(R2::new(0.0, 2.0));
        assert!(e.y < 0.0);
        assert_relative_eq!(e.x, 0.0);
    }

    #[test]
    fn coincident_query_is_zero_for_field_and_potential() {
        for charge in [1.0, -3.5e-6, 1.0e12] {
            let position = R2::new(-2.0, 7.5);
            let q = PointCharge::new(charge, position);
            assert_eq!(q.field(position), R2::zeros());
            assert_eq!(q.potential(position), 0.0);
        }
    }

    #[test]
    fn field_stays_finite_very_close_to_charge() {
        let q = PointCharge::new(1.0, R2::zeros());
        let e = q.field(R2::new(1.0e-110, 0.0));
        assert!(e.x.is_finite());
        assert_eq!(e.y, 0.0);
        assert_relative_eq!(e.x, COULOMB_CONSTANT * 1.0e220, max_relative = 1.0e-12);
    }

    #[test]
    fn field_stays_nonzero_far_from_charge() {
        let q = PointCharge::new(1.0, R2::zeros());
        let e = q.field(R2::new(1.0e110, 0.0));
        assert!(e.x > 0.0);
        assert_eq!(e.y, 0.0);
        assert_relative_eq!(e.x, COULOMB_CONSTANT * 1.0e-220, max_relative = 1.0e-12);
    }

    #[test]
    fn translated_moves_position_only() {
        let q = PointCharge::proton(R2::new(1.0, 2.0)).translated(R2::new(-1.0, 3.0));
        assert_eq!(q.position, R2::new(0.0, 5.0));
        assert_eq!(q.net_charge(), PROTON_CHARGE);
    }
}
