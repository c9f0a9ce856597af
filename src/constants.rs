//! Baseline physical constants for electrostatics.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! Coulomb's constant and ε₀ are measured values given to 11 significant figures,
//! which is well below the discretisation error of any structure built by this crate.
//!
//! ## References
//!
//! Physical constants are based on CODATA recommended values:
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)

use std::f64::consts::PI;

use crate::math::Scalar;

/// Coulomb's constant _k_e_ in newton square meters per square coulomb (N·m²/C²).
/// Approximate value: 8.9875517923 × 10⁹ N·m²/C².
pub const COULOMB_CONSTANT: Scalar = 8.987_551_792_3e9;
/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Elementary charge _e_ in coulombs (C).
/// Exact value by 2019 SI definition: 1.602176634 × 10⁻¹⁹ C.
pub const ELEMENTARY_CHARGE: Scalar = 1.602_176_634e-19;
/// Charge of a proton in coulombs (C).
pub const PROTON_CHARGE: Scalar = ELEMENTARY_CHARGE;
/// Charge of an electron in coulombs (C).
pub const ELECTRON_CHARGE: Scalar = -ELEMENTARY_CHARGE;
/// Charge of a neutron in coulombs (C).
pub const NEUTRON_CHARGE: Scalar = 0.0;

/// Coulomb's constant derived from the vacuum permittivity, `1 / (4π ε₀)`.
#[inline]
#[must_use]
pub fn coulomb_from_permittivity(permittivity: Scalar) -> Scalar {
    1.0 / (4.0 * PI * permittivity)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn coulomb_constant_matches_vacuum_permittivity() {
        let derived = coulomb_from_permittivity(VACUUM_PERMITTIVITY);
        assert_relative_eq!(derived, COULOMB_CONSTANT, max_relative = 1.0e-9);
    }

    #[test]
    fn proton_and_electron_cancel() {
        assert_eq!(PROTON_CHARGE + ELECTRON_CHARGE, NEUTRON_CHARGE);
    }
}
